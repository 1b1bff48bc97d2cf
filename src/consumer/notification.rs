//! Materialized push signals.

use super::consumer::Consumer;

/// One push signal, as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<T, E> {
    /// A value (`on_value`).
    Value(T),
    /// The terminal error (`on_error`).
    Error(E),
    /// The terminal completion (`on_complete`).
    Complete,
}

impl<T, E> Notification<T, E> {
    /// True for [`Notification::Error`] and [`Notification::Complete`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Notification::Value(_))
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Notification::Value(_) => "value",
            Notification::Error(_) => "error",
            Notification::Complete => "complete",
        }
    }

    /// Invokes the matching callback on `consumer`.
    pub fn dispatch<C: Consumer<T, E> + ?Sized>(self, consumer: &mut C) {
        match self {
            Notification::Value(v) => consumer.on_value(v),
            Notification::Error(e) => consumer.on_error(e),
            Notification::Complete => consumer.on_complete(),
        }
    }
}

/// Test helper: a consumer that records every notification it receives.
#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone)]
    pub(crate) struct Recorder<T, E> {
        log: Rc<RefCell<Vec<Notification<T, E>>>>,
    }

    impl<T: Clone, E: Clone> Recorder<T, E> {
        pub(crate) fn new() -> Self {
            Self {
                log: Rc::new(RefCell::new(Vec::new())),
            }
        }

        pub(crate) fn log(&self) -> Vec<Notification<T, E>> {
            self.log.borrow().clone()
        }

        pub(crate) fn values(&self) -> Vec<T> {
            self.log
                .borrow()
                .iter()
                .filter_map(|n| match n {
                    Notification::Value(v) => Some(v.clone()),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn terminals(&self) -> usize {
            self.log.borrow().iter().filter(|n| n.is_terminal()).count()
        }
    }

    impl<T, E> Consumer<T, E> for Recorder<T, E> {
        fn on_value(&mut self, value: T) {
            self.log.borrow_mut().push(Notification::Value(value));
        }

        fn on_error(&mut self, error: E) {
            self.log.borrow_mut().push(Notification::Error(error));
        }

        fn on_complete(&mut self) {
            self.log.borrow_mut().push(Notification::Complete);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;

    #[test]
    fn test_dispatch_invokes_matching_callback() {
        let mut rec = Recorder::<i32, &str>::new();
        Notification::Value(1).dispatch(&mut rec);
        Notification::Error("x").dispatch(&mut rec);
        Notification::<i32, &str>::Complete.dispatch(&mut rec);

        assert_eq!(
            rec.log(),
            vec![
                Notification::Value(1),
                Notification::Error("x"),
                Notification::Complete
            ]
        );
        assert_eq!(rec.terminals(), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Notification::<u8, ()>::Value(0).as_label(), "value");
        assert_eq!(Notification::<u8, ()>::Error(()).as_label(), "error");
        assert!(!Notification::<u8, ()>::Value(0).is_terminal());
        assert!(Notification::<u8, ()>::Complete.is_terminal());
    }
}
