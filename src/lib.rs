//! A reactive form model: a tree of fields, groups, and repeatable lists
//! with typed validation rules, change notification, and a debounced derived
//! display message.
//!
//! The [`form`] module holds the generic model, [`validate`] the rule engine,
//! [`notify`] the change stream and debouncer, and [`message`] the error-code
//! to display-text mapping. [`customer`] wires them into the concrete
//! customer form the demo binary exercises.

pub mod config;
pub mod customer;
pub mod form;
pub mod logging;
pub mod message;
pub mod notify;
pub mod validate;
