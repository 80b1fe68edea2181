use axum::routing::MethodFilter;
use axum::Router;
use noted_proto::recommendations::ExtractKeywordsRequest;
use noted_rest::Route;

use crate::dispatch::rpc;
use crate::gateway::Gateway;

pub(crate) fn router() -> Router<Gateway> {
    Router::new().route(
        "/recommendations/keywords",
        rpc(
            MethodFilter::POST,
            Route::<ExtractKeywordsRequest>::public("ExtractKeywords").json_body(),
            |gw, req| async move { gw.recommendations().extract_keywords(req).await },
        ),
    )
}
