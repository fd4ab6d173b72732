//! Integration tests for the cleanup stack and scope unwinding

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use cleanup_stack::{
    CleanupStack, ScopeFrame, StackConfig, StackError, defer, unwind_break, unwind_return,
    with_scope,
};

type Log = Rc<RefCell<Vec<&'static str>>>;

fn record(log: &Log, name: &'static str) -> impl FnOnce() + 'static {
    let log = log.clone();
    move || log.borrow_mut().push(name)
}

#[test]
fn test_full_unwind_runs_lifo() {
    // Scenario: push a, b, c; full unwind executes c, b, a and returns the value
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut stack = CleanupStack::with_capacity(3).unwrap();

    stack.push(record(&log, "a"));
    stack.push(record(&log, "b"));
    stack.push(record(&log, "c"));

    let value = stack.unwind_and_return(0);

    assert_eq!(value, 0);
    assert_eq!(stack.height(), 0);
    assert_eq!(*log.borrow(), vec!["c", "b", "a"]);
}

#[test]
fn test_partial_unwind_restores_boundary() {
    // Scenario: push a, b; open a scope; push c; closing the scope runs c only
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut stack = CleanupStack::with_capacity(3).unwrap();

    stack.push(record(&log, "a"));
    stack.push(record(&log, "b"));

    let boundary = stack.mark();
    assert_eq!(boundary.height(), 2);

    stack.push(record(&log, "c"));
    stack.unwind_to(boundary);

    assert_eq!(stack.height(), 2);
    assert_eq!(*log.borrow(), vec!["c"]);

    stack.unwind_all();
    assert_eq!(*log.borrow(), vec!["c", "b", "a"]);
}

#[test]
#[should_panic(expected = "at capacity")]
fn test_push_beyond_capacity_is_fatal() {
    let mut stack = CleanupStack::with_capacity(2).unwrap();
    stack.push(|| {});
    stack.push(|| {});
    stack.push(|| {});
}

#[test]
fn test_overflow_leaves_prior_state_untouched() {
    // Scenario: capacity 2; the fatal third push must not run or drop a and b
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut stack = CleanupStack::with_capacity(2).unwrap();

    stack.push(record(&log, "a"));
    stack.push(record(&log, "b"));

    let attempt = catch_unwind(AssertUnwindSafe(|| {
        stack.push(record(&log, "c"));
    }));

    assert!(attempt.is_err());
    assert_eq!(stack.height(), 2);
    assert!(log.borrow().is_empty());

    // a and b are still registered and still unwind in order
    stack.unwind_all();
    assert_eq!(*log.borrow(), vec!["b", "a"]);
}

#[test]
#[should_panic(expected = "empty")]
fn test_pop_on_empty_is_fatal() {
    let mut stack = CleanupStack::with_capacity(1).unwrap();
    stack.pop_and_run();
}

#[test]
fn test_loop_scopes_with_early_return() {
    // Scenario: three loop iterations each open a scope; an induced failure
    // at iteration 2 exits the whole activation via a full unwind
    fn translate(stack: &mut CleanupStack<'_>, log: &Log) -> i32 {
        for i in 0..3 {
            let boundary = stack.mark();
            stack.push(record(
                log,
                match i {
                    0 => "resource-0",
                    1 => "resource-1",
                    _ => "resource-2",
                },
            ));

            if i == 2 {
                // induced failure: leave the activation, cleaning up everything
                return stack.unwind_and_return(-1);
            }

            stack.unwind_to(boundary);
        }
        0
    }

    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut stack = CleanupStack::with_capacity(2).unwrap();

    let result = translate(&mut stack, &log);

    assert_eq!(result, -1);
    assert_eq!(stack.height(), 0);
    assert_eq!(
        *log.borrow(),
        vec!["resource-0", "resource-1", "resource-2"]
    );
}

#[test]
fn test_no_double_execution_across_mixed_unwinds() {
    let counts: Vec<Rc<RefCell<u32>>> = (0..4).map(|_| Rc::new(RefCell::new(0))).collect();
    let mut stack = CleanupStack::with_capacity(4).unwrap();

    let bump = |cell: &Rc<RefCell<u32>>| {
        let cell = cell.clone();
        move || *cell.borrow_mut() += 1
    };

    stack.push(bump(&counts[0]));

    let boundary = stack.mark();
    stack.push(bump(&counts[1]));
    stack.push(bump(&counts[2]));
    stack.unwind_to(boundary);

    stack.push(bump(&counts[3]));
    stack.unwind_all();

    // the stale boundary after the full unwind must not re-run anything
    stack.unwind_to(boundary);
    drop(stack);

    for count in &counts {
        assert_eq!(*count.borrow(), 1);
    }
}

#[test]
fn test_unwind_to_without_registrations_is_noop() {
    let mut stack = CleanupStack::with_capacity(2).unwrap();
    let boundary = stack.mark();
    stack.unwind_to(boundary);
    assert_eq!(stack.height(), 0);
}

#[test]
fn test_drop_drains_pending_actions() {
    // Backstop: a stack abandoned mid-activation (e.g. by a panic in the
    // collaborator) still runs what was registered, in order
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    {
        let mut stack = CleanupStack::with_capacity(2).unwrap();
        stack.push(record(&log, "a"));
        stack.push(record(&log, "b"));
    }

    assert_eq!(*log.borrow(), vec!["b", "a"]);
}

#[test]
fn test_labeled_stack_in_panic_message() {
    let config = StackConfig::production().with_label("translate");
    let mut stack = CleanupStack::with_config(1, config).unwrap();
    stack.push(|| {});

    let attempt = catch_unwind(AssertUnwindSafe(|| stack.push(|| {})));
    let panic_message = *attempt.unwrap_err().downcast::<String>().unwrap();
    assert!(panic_message.contains("translate"));
}

#[test]
fn test_try_push_reports_capacity() {
    let mut stack = CleanupStack::with_capacity(1).unwrap();
    assert_eq!(stack.try_push(|| {}), Ok(()));
    assert_eq!(
        stack.try_push(|| {}),
        Err(StackError::CapacityExceeded { capacity: 1 })
    );
    assert_eq!(stack.remaining(), 0);
    stack.unwind_all();
    assert_eq!(stack.remaining(), 1);
}

#[test]
fn test_defer_and_with_scope_macros() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut stack = CleanupStack::with_capacity(3).unwrap();

    defer!(stack, {
        // placeholder for releasing an activation-wide resource
    });

    with_scope!(&mut stack, |frame| {
        frame.defer(record(&log, "scoped"));
        assert_eq!(frame.stack().height(), 2);
    });

    assert_eq!(*log.borrow(), vec!["scoped"]);
    assert_eq!(stack.height(), 1);
    stack.unwind_all();
}

#[test]
fn test_unwind_break_macro() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut stack = CleanupStack::with_capacity(3).unwrap();

    stack.push(record(&log, "outer"));

    let mut iterations = 0;
    loop {
        let boundary = stack.mark();
        stack.push(record(&log, "iteration"));
        iterations += 1;

        if iterations == 2 {
            unwind_break!(stack, boundary);
        }
        stack.unwind_to(boundary);
    }

    assert_eq!(iterations, 2);
    assert_eq!(stack.height(), 1);
    assert_eq!(*log.borrow(), vec!["iteration", "iteration"]);

    stack.unwind_all();
    assert_eq!(*log.borrow(), vec!["iteration", "iteration", "outer"]);
}

#[test]
fn test_unwind_return_macro() {
    fn run(stack: &mut CleanupStack<'_>, log: &Log) -> i32 {
        stack.push(record(log, "a"));
        stack.push(record(log, "b"));
        unwind_return!(stack, 7)
    }

    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut stack = CleanupStack::with_capacity(2).unwrap();

    assert_eq!(run(&mut stack, &log), 7);
    assert_eq!(stack.height(), 0);
    assert_eq!(*log.borrow(), vec!["b", "a"]);
}

#[test]
fn test_scope_frame_survives_question_mark_exit() {
    fn fallible(stack: &mut CleanupStack<'_>, log: &Log, fail: bool) -> Result<(), String> {
        let mut frame = ScopeFrame::enter(stack);
        frame.defer(record(log, "guarded"));

        if fail {
            Err("acquisition failed".to_string())?;
        }
        Ok(())
    }

    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut stack = CleanupStack::with_capacity(2).unwrap();

    assert!(fallible(&mut stack, &log, true).is_err());
    assert_eq!(stack.height(), 0);
    assert_eq!(*log.borrow(), vec!["guarded"]);
}
