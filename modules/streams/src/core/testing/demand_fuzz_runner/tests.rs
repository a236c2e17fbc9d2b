use super::DemandFuzzRunner;

#[test]
fn every_attempt_is_observed_or_dropped() {
  for seed in [1, 7, 42, 1_000_003, u64::MAX] {
    let report = DemandFuzzRunner::new(seed).run(500);
    assert!(report.is_balanced(), "seed {seed}: {report:?}");
  }
}

#[test]
fn runs_are_reproducible() {
  assert_eq!(DemandFuzzRunner::new(99).run(200), DemandFuzzRunner::new(99).run(200));
}

#[test]
fn emissions_outpacing_demand_are_dropped() {
  let report = DemandFuzzRunner::new(3).run(2_000);
  assert!(report.attempted() > 0);
  assert!(report.dropped() > 0);
}
