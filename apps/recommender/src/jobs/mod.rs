// Job recommendation: CSV table loading, schema resolution, ranking pipeline,
// and the HTTP handler in front of it.

pub mod handlers;
pub mod recommender;
pub mod schema;
pub mod table;
