//! Entity <-> model mappers

mod chat;
mod direct_message;
mod invitation;
mod user;
