use std::time::Duration;

use rivulet_streams_rs::core::{
  Flux, StreamError,
  testing::StepVerifier,
};

fn main() {
  let names = Flux::from_iterable(["John", "Monica", "Mark", "Cloe", "Frank", "Casper", "Olivia", "Emily", "Cate"])
    .filter(|name| name.len() == 4)
    .map(str::to_uppercase)
    .concat_with(Flux::error(StreamError::message("Error Message")));

  let outcome = StepVerifier::create(names)
    .expect_next_all(["JOHN", "MARK", "CLOE", "CATE"].map(String::from))
    .expect_error_message("Error Message")
    .verify();
  println!("names: {outcome:?}");

  let report = StepVerifier::with_virtual_time(|scheduler| Flux::interval(Duration::from_secs(3600), scheduler).take(2))
    .expect_no_event(Duration::from_secs(3600))
    .expect_next(0)
    .then_await(Duration::from_secs(3600))
    .expect_next(1)
    .verify_complete()
    .expect("two hourly ticks");
  println!("two hours of virtual time verified: {:?}", report.virtual_elapsed());
}
