use std::time::Duration;

use rivulet_streams_rs::{
  core::{Flux, VirtualScheduler},
  std::TokioTickDriver,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
  let scheduler = VirtualScheduler::new();
  let squares = Flux::interval(Duration::from_millis(100), &scheduler).take(5).map(|tick| tick * tick);
  let _subscription = squares.subscribe_with(
    |value| println!("tick: {value}"),
    |error| println!("failed: {error}"),
    || println!("done"),
  );

  let driver = TokioTickDriver::start(scheduler.clone(), Duration::from_millis(10)).expect("tokio runtime");
  tokio::time::sleep(Duration::from_millis(700)).await;
  driver.shutdown();
  println!("virtual time reached {:?}", scheduler.now());
}
