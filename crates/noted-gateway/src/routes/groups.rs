use axum::extract::State;
use axum::routing::{get, post, MethodFilter};
use axum::Router;
use noted_proto::accounts::{
    AddGroupNoteRequest, CreateGroupRequest, DeleteGroupRequest, GetGroupNoteRequest,
    GetGroupRequest, GetMemberRequest, ListGroupNotesRequest, ListGroupsRequest,
    ListMembersRequest, RemoveGroupNoteRequest, RemoveMemberRequest, UpdateGroupNoteRequest,
    UpdateGroupRequest, UpdateMemberRequest,
};
use noted_proto::notes::{CreateNoteRequest, CreateNoteResponse};
use noted_rest::{Envelope, JsonReply, RestError, Route};

use super::export::export_note;
use crate::dispatch::rpc;
use crate::gateway::Gateway;

pub(crate) fn router() -> Router<Gateway> {
    Router::new()
        .route(
            "/groups",
            rpc(
                MethodFilter::POST,
                Route::<CreateGroupRequest>::authenticated("CreateGroup").json_body(),
                |gw, req| async move { gw.groups().create_group(req).await },
            ),
        )
        .route(
            "/groups",
            rpc(
                MethodFilter::GET,
                Route::<ListGroupsRequest>::authenticated("ListGroups").bind(|req, env| {
                    let page = env.page();
                    req.account_id = env.query_param("account_id");
                    req.limit = page.limit;
                    req.offset = page.offset;
                }),
                |gw, req| async move { gw.groups().list_groups(req).await },
            ),
        )
        .route(
            "/groups/{group_id}",
            rpc(
                MethodFilter::GET,
                Route::<GetGroupRequest>::authenticated("GetGroup")
                    .bind(|req, env| req.group_id = env.path_param("group_id")),
                |gw, req| async move { gw.groups().get_group(req).await },
            ),
        )
        .route(
            "/groups/{group_id}",
            rpc(
                MethodFilter::PATCH,
                Route::<UpdateGroupRequest>::authenticated("UpdateGroup")
                    .json_body()
                    .bind(|req, env| req.group_id = env.path_param("group_id")),
                |gw, req| async move { gw.groups().update_group(req).await },
            ),
        )
        .route(
            "/groups/{group_id}",
            rpc(
                MethodFilter::DELETE,
                Route::<DeleteGroupRequest>::authenticated("DeleteGroup")
                    .bind(|req, env| req.group_id = env.path_param("group_id")),
                |gw, req| async move { gw.groups().delete_group(req).await },
            ),
        )
        .merge(members())
        .merge(notes())
}

fn members() -> Router<Gateway> {
    Router::new()
        .route(
            "/groups/{group_id}/members",
            rpc(
                MethodFilter::GET,
                Route::<ListMembersRequest>::authenticated("ListMembers").bind(|req, env| {
                    let page = env.page();
                    req.group_id = env.path_param("group_id");
                    req.limit = page.limit;
                    req.offset = page.offset;
                }),
                |gw, req| async move { gw.groups().list_members(req).await },
            ),
        )
        .route(
            "/groups/{group_id}/members/{member_id}",
            rpc(
                MethodFilter::GET,
                Route::<GetMemberRequest>::authenticated("GetMember").bind(|req, env| {
                    req.group_id = env.path_param("group_id");
                    req.account_id = env.path_param("member_id");
                }),
                |gw, req| async move { gw.groups().get_member(req).await },
            ),
        )
        .route(
            "/groups/{group_id}/members/{member_id}",
            rpc(
                MethodFilter::PATCH,
                Route::<UpdateMemberRequest>::authenticated("UpdateMember")
                    .json_body()
                    .bind(|req, env| {
                        req.group_id = env.path_param("group_id");
                        req.account_id = env.path_param("member_id");
                    }),
                |gw, req| async move { gw.groups().update_member(req).await },
            ),
        )
        .route(
            "/groups/{group_id}/members/{member_id}",
            rpc(
                MethodFilter::DELETE,
                Route::<RemoveMemberRequest>::authenticated("RemoveMember").bind(|req, env| {
                    req.group_id = env.path_param("group_id");
                    req.account_id = env.path_param("member_id");
                }),
                |gw, req| async move { gw.groups().remove_member(req).await },
            ),
        )
}

fn notes() -> Router<Gateway> {
    Router::new()
        .route("/groups/{group_id}/notes", post(create_group_note))
        .route(
            "/groups/{group_id}/notes",
            rpc(
                MethodFilter::GET,
                Route::<ListGroupNotesRequest>::authenticated("ListGroupNotes").bind(|req, env| {
                    let page = env.page();
                    req.group_id = env.path_param("group_id");
                    req.limit = page.limit;
                    req.offset = page.offset;
                }),
                |gw, req| async move { gw.groups().list_group_notes(req).await },
            ),
        )
        .route(
            "/groups/{group_id}/notes/{note_id}",
            rpc(
                MethodFilter::GET,
                Route::<GetGroupNoteRequest>::authenticated("GetGroupNote").bind(|req, env| {
                    req.group_id = env.path_param("group_id");
                    req.note_id = env.path_param("note_id");
                }),
                |gw, req| async move { gw.groups().get_group_note(req).await },
            ),
        )
        .route(
            "/groups/{group_id}/notes/{note_id}",
            rpc(
                MethodFilter::PATCH,
                Route::<UpdateGroupNoteRequest>::authenticated("UpdateGroupNote")
                    .json_body()
                    .bind(|req, env| {
                        req.group_id = env.path_param("group_id");
                        req.note_id = env.path_param("note_id");
                    }),
                |gw, req| async move { gw.groups().update_group_note(req).await },
            ),
        )
        .route(
            "/groups/{group_id}/notes/{note_id}",
            rpc(
                MethodFilter::DELETE,
                Route::<RemoveGroupNoteRequest>::authenticated("RemoveGroupNote").bind(
                    |req, env| {
                        req.group_id = env.path_param("group_id");
                        req.note_id = env.path_param("note_id");
                    },
                ),
                |gw, req| async move { gw.groups().remove_group_note(req).await },
            ),
        )
        .route("/groups/{group_id}/notes/{note_id}/export", get(export_note))
}

/// Create a note, then attach it to the group in the path.
///
/// The two calls are not atomic: when attaching fails the note still exists
/// and the client sees the second call's error.
async fn create_group_note(
    State(gateway): State<Gateway>,
    envelope: Envelope,
) -> Result<JsonReply<CreateNoteResponse>, RestError> {
    let route = Route::<CreateNoteRequest>::authenticated("CreateGroupNote").json_body();
    let (ctx, req) = route.prepare(&envelope, gateway.rpc_timeout())?;

    let created = route
        .invoke(gateway.notes().create_note(ctx.request(req)))
        .await?;

    let note = created.note.clone().unwrap_or_default();
    let attach = AddGroupNoteRequest {
        group_id: envelope.path_param("group_id"),
        note_id: note.id,
        title: note.title,
    };
    route
        .invoke(gateway.groups().add_group_note(ctx.request(attach)))
        .await?;

    Ok(JsonReply(created))
}
