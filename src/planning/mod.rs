//! Capacity planning from demand forecasts.
//!
//! Two different rules meet here:
//! - recommending capacity looks at the whole forecast and provisions for its
//!   `service_level` quantile, rounded up to whole capacity units;
//! - evaluating a capacity looks at each period of actual demand on its own,
//!   rounding that period's requirement up, and charges the asymmetric
//!   over/under rates per unit of mismatch.

mod capacity;

pub use capacity::{
    evaluate_capacity_cost, plan_capacity, recommend_capacity, CapacityPlan,
    CapacityRecommendation, PlanningConfig,
};
