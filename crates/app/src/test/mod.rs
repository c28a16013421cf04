//! Test support

pub(crate) mod db;

pub(crate) use context::TestContext;
