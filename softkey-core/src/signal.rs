//! The primitive signals delivered to the native application.

use std::rc::Rc;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The normalized event stream produced from the raw input method callbacks.
///
/// This is the only data crossing the boundary to the native application. Signals produced from
/// a single raw event keep their relative order, and signals from different raw events are
/// delivered in the order the raw events arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrimitiveSignal {
    /// A single committed character. Never a line feed.
    CharacterInput(char),
    /// One backspace, regardless of how many characters the input method asked to remove.
    DeleteBackward,
    /// The user ended the current line.
    Submit,
}

impl PrimitiveSignal {
    /// Route this signal to the matching [`EventSink`] entry point.
    #[inline]
    pub fn dispatch(self, sink: &dyn EventSink) {
        match self {
            PrimitiveSignal::CharacterInput(ch) => sink.on_character_input(ch),
            PrimitiveSignal::DeleteBackward => sink.on_key_delete(),
            PrimitiveSignal::Submit => sink.on_submit(),
        }
    }
}

/// The native side of the bridge.
///
/// Every method is called synchronously on the UI thread, and must not block it. The sink owns
/// whatever text state the application keeps; the bridge itself retains none.
pub trait EventSink {
    /// A character was committed.
    fn on_character_input(&self, ch: char);

    /// One character before the cursor should be removed.
    fn on_key_delete(&self);

    /// A line feed was committed.
    ///
    /// Native applications that only care about characters and deletion may leave this as the
    /// default no-op.
    fn on_submit(&self) {}
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn on_character_input(&self, ch: char) {
        (**self).on_character_input(ch)
    }

    fn on_key_delete(&self) {
        (**self).on_key_delete()
    }

    fn on_submit(&self) {
        (**self).on_submit()
    }
}

impl<S: EventSink + ?Sized> EventSink for Rc<S> {
    fn on_character_input(&self, ch: char) {
        (**self).on_character_input(ch)
    }

    fn on_key_delete(&self) {
        (**self).on_key_delete()
    }

    fn on_submit(&self) {
        (**self).on_submit()
    }
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn on_character_input(&self, ch: char) {
        (**self).on_character_input(ch)
    }

    fn on_key_delete(&self) {
        (**self).on_key_delete()
    }

    fn on_submit(&self) {
        (**self).on_submit()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Calls(RefCell<Vec<&'static str>>);

    impl EventSink for Calls {
        fn on_character_input(&self, _ch: char) {
            self.0.borrow_mut().push("char");
        }

        fn on_key_delete(&self) {
            self.0.borrow_mut().push("delete");
        }

        fn on_submit(&self) {
            self.0.borrow_mut().push("submit");
        }
    }

    struct NoSubmit(RefCell<usize>);

    impl EventSink for NoSubmit {
        fn on_character_input(&self, _ch: char) {
            *self.0.borrow_mut() += 1;
        }

        fn on_key_delete(&self) {
            *self.0.borrow_mut() += 1;
        }
    }

    #[test]
    fn dispatch_routes_each_variant() {
        let calls = Calls::default();
        PrimitiveSignal::CharacterInput('x').dispatch(&calls);
        PrimitiveSignal::DeleteBackward.dispatch(&calls);
        PrimitiveSignal::Submit.dispatch(&calls);
        assert_eq!(*calls.0.borrow(), ["char", "delete", "submit"]);
    }

    #[test]
    fn submit_defaults_to_noop() {
        let sink = NoSubmit(RefCell::new(0));
        PrimitiveSignal::Submit.dispatch(&sink);
        assert_eq!(*sink.0.borrow(), 0);
        PrimitiveSignal::DeleteBackward.dispatch(&sink);
        assert_eq!(*sink.0.borrow(), 1);
    }

    #[test]
    fn dispatch_through_rc() {
        let calls = Rc::new(Calls::default());
        let sink: Rc<dyn EventSink> = calls.clone();
        PrimitiveSignal::CharacterInput('a').dispatch(&sink);
        assert_eq!(*calls.0.borrow(), ["char"]);
    }
}
