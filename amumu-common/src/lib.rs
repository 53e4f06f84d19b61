// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate derive_new;

#[macro_use]
extern crate log;

extern crate serde;
extern crate serde_json;

extern crate chrono;

pub mod rank;
pub mod model;
pub mod balance;
pub mod ranking;
pub mod api;

/*
    Common error_chain for all of lib to use so the ? operator passes things around real well.

    Add `use ::errors::*;` to the sub-modules to gain access to it.
*/
pub mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain!{
        foreign_links {
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }

        errors {
            InvalidRosterSize(found: usize) {
                description("a roster must contain exactly ten players")
                display("a roster must contain exactly {} players, found {}", ::balance::ROSTER_SIZE, found)
            }

            DuplicatePlayer(id: u64) {
                description("a player appears more than once in the roster")
                display("player id: {} appears more than once in the roster", id)
            }

            InvalidMatchResult(reason: String) {
                description("match result can not be recorded")
                display("match result can not be recorded: {}", reason)
            }
        }
    }
}
