//! Fetch stage of each view's fetch-and-render cycle.

use sim_analytics::NetworkParams;

use crate::api::{ApiError, SimApi};
use crate::domain::{ViewData, ViewId};

/// Fetch everything `view` needs in one cycle.
///
/// Views backed by two endpoints issue both requests together; either
/// failure fails the whole cycle so a partial view is never shown.
pub async fn load_view(api: &dyn SimApi, view: ViewId) -> Result<ViewData, ApiError> {
    let data = match view {
        ViewId::Dashboard => {
            let (analytics, balances) = tokio::try_join!(api.analytics(), api.balances())?;
            ViewData::Dashboard {
                analytics,
                balances,
            }
        }
        ViewId::Analytics => ViewData::Analytics(api.analytics().await?),
        ViewId::Parameters => ViewData::Parameters(params_of(api).await?),
        ViewId::Mempool => ViewData::Mempool(api.mempool().await?),
        ViewId::Decentralization => ViewData::Decentralization(api.analytics().await?),
        ViewId::Explorer => ViewData::Explorer(api.chain().await?),
        ViewId::History => ViewData::History(api.transactions().await?),
        ViewId::Wallet => ViewData::Wallet(api.balances().await?),
    };
    Ok(data)
}

async fn params_of(api: &dyn SimApi) -> Result<NetworkParams, ApiError> {
    Ok(api.analytics().await?.network_params)
}
