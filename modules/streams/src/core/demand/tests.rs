use super::Demand;

#[test]
fn max_request_is_unbounded() {
  assert_eq!(Demand::from_request(u64::MAX), Demand::Unbounded);
  assert_eq!(Demand::from_request(3), Demand::Finite(3));
  assert_eq!(Demand::Unbounded.as_request(), u64::MAX);
}

#[test]
fn has_demand_reflects_remaining() {
  assert!(!Demand::Finite(0).has_demand());
  assert!(Demand::Finite(1).has_demand());
  assert!(Demand::Unbounded.has_demand());
  assert_eq!(Demand::Unbounded.remaining(), None);
}
