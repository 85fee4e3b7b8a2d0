mod end_to_end_tests;
mod fetcher_tests;
mod runner_tests;
