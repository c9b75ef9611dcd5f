use super::{api, front, Action};
use anyhow::Result;

pub(super) async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Front(args) => front::execute(args).await,
        Action::Api(args) => api::execute(args).await,
    }
}
