#[macro_use]
extern crate log;

extern crate serde_json;

extern crate chrono;

extern crate amumu_common;

pub mod engine;
