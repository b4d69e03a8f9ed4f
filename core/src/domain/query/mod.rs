//! Translation of list-endpoint query strings into a storage query plan.
//!
//! A request like `?averageCost[gte]=1000&select=name,housing&sort=-name&page=2`
//! becomes a [`QueryPlan`](entities::QueryPlan): a filter document with prefixed
//! comparison operators, a projection, a sort order and a skip/limit window.
//! The pagination descriptor is derived from the plan once the matching total is
//! known.

pub mod entities;
pub mod translator;
pub mod value_objects;
