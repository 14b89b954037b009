pub mod classify;
pub mod contact;
pub mod convert;
pub mod idea;
pub mod inbox;
pub mod project;
pub mod record;
pub mod task;
pub mod temporal;
