mod common;

mod filter;
