use axum::routing::{get, MethodFilter};
use axum::Router;
use noted_proto::notes::{
    CreateNoteRequest, DeleteBlockRequest, DeleteNoteRequest, GetNoteRequest, InsertBlockRequest,
    ListNotesRequest, UpdateBlockRequest, UpdateNoteRequest,
};
use noted_rest::Route;

use super::export::export_note;
use crate::dispatch::rpc;
use crate::gateway::Gateway;

pub(crate) fn router() -> Router<Gateway> {
    Router::new()
        .route(
            "/notes",
            rpc(
                MethodFilter::POST,
                Route::<CreateNoteRequest>::authenticated("CreateNote").json_body(),
                |gw, req| async move { gw.notes().create_note(req).await },
            ),
        )
        .route(
            "/notes",
            rpc(
                MethodFilter::GET,
                Route::<ListNotesRequest>::authenticated("ListNotes").bind(|req, env| {
                    let page = env.page();
                    req.author_id = env.query_param("author_id");
                    req.limit = page.limit;
                    req.offset = page.offset;
                }),
                |gw, req| async move { gw.notes().list_notes(req).await },
            ),
        )
        .route(
            "/notes/{note_id}",
            rpc(
                MethodFilter::GET,
                Route::<GetNoteRequest>::authenticated("GetNote")
                    .bind(|req, env| req.note_id = env.path_param("note_id")),
                |gw, req| async move { gw.notes().get_note(req).await },
            ),
        )
        .route(
            "/notes/{note_id}",
            rpc(
                MethodFilter::PATCH,
                Route::<UpdateNoteRequest>::authenticated("UpdateNote")
                    .json_body()
                    .bind(|req, env| req.note_id = env.path_param("note_id")),
                |gw, req| async move { gw.notes().update_note(req).await },
            ),
        )
        .route(
            "/notes/{note_id}",
            rpc(
                MethodFilter::DELETE,
                Route::<DeleteNoteRequest>::authenticated("DeleteNote")
                    .bind(|req, env| req.note_id = env.path_param("note_id")),
                |gw, req| async move { gw.notes().delete_note(req).await },
            ),
        )
        .route("/notes/{note_id}/export", get(export_note))
        .route(
            "/notes/{note_id}/blocks",
            rpc(
                MethodFilter::POST,
                Route::<InsertBlockRequest>::authenticated("InsertBlock")
                    .json_body()
                    .bind(|req, env| req.note_id = env.path_param("note_id")),
                |gw, req| async move { gw.notes().insert_block(req).await },
            ),
        )
        .route(
            "/notes/{note_id}/blocks/{block_id}",
            rpc(
                MethodFilter::PATCH,
                Route::<UpdateBlockRequest>::authenticated("UpdateBlock")
                    .json_body()
                    .bind(|req, env| {
                        req.note_id = env.path_param("note_id");
                        req.block_id = env.path_param("block_id");
                    }),
                |gw, req| async move { gw.notes().update_block(req).await },
            ),
        )
        .route(
            "/notes/{note_id}/blocks/{block_id}",
            rpc(
                MethodFilter::DELETE,
                Route::<DeleteBlockRequest>::authenticated("DeleteBlock").bind(|req, env| {
                    req.note_id = env.path_param("note_id");
                    req.block_id = env.path_param("block_id");
                }),
                |gw, req| async move { gw.notes().delete_block(req).await },
            ),
        )
}
