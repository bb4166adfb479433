#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod random;
pub(crate) mod store;

pub(crate) use http::{assert_json_error, get_test_app_state, get_test_server, transaction_path};
pub(crate) use random::ScriptedRandom;
pub(crate) use store::InMemoryTransactionStore;
