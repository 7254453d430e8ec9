//! Thread-scoped ambient fields merged into every record logged on the
//! current thread.

use std::cell::RefCell;

use serde_json::{Map, Value};

thread_local! {
    static CONTEXT: RefCell<Map<String, Value>> = RefCell::new(Map::new());
}

pub fn bind_contextvars<I, K, V>(pairs: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    CONTEXT.with(|context| {
        let mut context = context.borrow_mut();
        for (key, value) in pairs {
            context.insert(key.into(), value.into());
        }
    });
}

pub fn unbind_contextvars(keys: &[&str]) {
    CONTEXT.with(|context| {
        let mut context = context.borrow_mut();
        for key in keys {
            context.remove(*key);
        }
    });
}

pub fn clear_contextvars() {
    CONTEXT.with(|context| context.borrow_mut().clear());
}

pub fn contextvars() -> Map<String, Value> {
    CONTEXT.with(|context| context.borrow().clone())
}
