use storage::Database;

use crate::live::ScoreFeed;
use crate::middleware::auth::ApiKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub feed: ScoreFeed,
    pub api_keys: ApiKeys,
}
