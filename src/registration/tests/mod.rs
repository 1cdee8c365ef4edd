mod common;

mod guard;
mod summary;
