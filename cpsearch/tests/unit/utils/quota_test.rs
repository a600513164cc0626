use super::*;

struct FixedQuota(bool);

impl Quota for FixedQuota {
    fn is_reached(&self) -> bool {
        self.0
    }
}

#[test]
fn can_detect_time_quota() {
    assert!(!TimeQuota::new(60.).is_reached());
    assert!(TimeQuota::new(-1.).is_reached());
}

parameterized_test! {can_use_composite_quota, (inners, expected), {
    let inners = inners.into_iter().map(|value| Arc::new(FixedQuota(value)) as Arc<dyn Quota + Send + Sync>).collect();

    assert_eq!(CompositeQuota::new(inners).is_reached(), expected);
}}

can_use_composite_quota! {
    case01_empty: (Vec::<bool>::new(), false),
    case02_none_reached: (vec![false, false], false),
    case03_one_reached: (vec![false, true], true),
    case04_all_reached: (vec![true, true], true),
}
