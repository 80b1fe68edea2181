use axum::routing::MethodFilter;
use axum::Router;
use noted_proto::accounts::{
    AcceptInviteRequest, DenyInviteRequest, GetInviteRequest, ListInvitesRequest,
    SendInviteRequest,
};
use noted_rest::Route;

use crate::dispatch::rpc;
use crate::gateway::Gateway;

pub(crate) fn router() -> Router<Gateway> {
    Router::new()
        .route(
            "/invites",
            rpc(
                MethodFilter::POST,
                Route::<SendInviteRequest>::authenticated("SendInvite").json_body(),
                |gw, req| async move { gw.invites().send_invite(req).await },
            ),
        )
        .route(
            "/invites",
            rpc(
                MethodFilter::GET,
                Route::<ListInvitesRequest>::authenticated("ListInvites").bind(|req, env| {
                    let page = env.page();
                    req.sender_account_id = env.query_param("sender_account_id");
                    req.recipient_account_id = env.query_param("recipient_account_id");
                    req.group_id = env.query_param("group_id");
                    req.limit = page.limit;
                    req.offset = page.offset;
                }),
                |gw, req| async move { gw.invites().list_invites(req).await },
            ),
        )
        .route(
            "/invites/{invite_id}",
            rpc(
                MethodFilter::GET,
                Route::<GetInviteRequest>::authenticated("GetInvite")
                    .bind(|req, env| req.invite_id = env.path_param("invite_id")),
                |gw, req| async move { gw.invites().get_invite(req).await },
            ),
        )
        .route(
            "/invites/{invite_id}/accept",
            rpc(
                MethodFilter::POST,
                Route::<AcceptInviteRequest>::authenticated("AcceptInvite")
                    .bind(|req, env| req.invite_id = env.path_param("invite_id")),
                |gw, req| async move { gw.invites().accept_invite(req).await },
            ),
        )
        .route(
            "/invites/{invite_id}/deny",
            rpc(
                MethodFilter::POST,
                Route::<DenyInviteRequest>::authenticated("DenyInvite")
                    .bind(|req, env| req.invite_id = env.path_param("invite_id")),
                |gw, req| async move { gw.invites().deny_invite(req).await },
            ),
        )
}
