mod helpers;
mod register_test;
mod token_test;
