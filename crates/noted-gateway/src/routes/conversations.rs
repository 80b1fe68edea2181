use axum::routing::MethodFilter;
use axum::Router;
use noted_proto::accounts::{
    CreateConversationRequest, DeleteConversationMessageRequest, DeleteConversationRequest,
    GetConversationMessageRequest, GetConversationRequest, ListConversationMessagesRequest,
    ListConversationsRequest, SendConversationMessageRequest, UpdateConversationMessageRequest,
    UpdateConversationRequest,
};
use noted_rest::Route;

use crate::dispatch::rpc;
use crate::gateway::Gateway;

pub(crate) fn router() -> Router<Gateway> {
    Router::new()
        .route(
            "/conversations",
            rpc(
                MethodFilter::POST,
                Route::<CreateConversationRequest>::authenticated("CreateConversation")
                    .json_body()
                    .bind(|req, env| req.group_id = env.query_param("group_id")),
                |gw, req| async move { gw.conversations().create_conversation(req).await },
            ),
        )
        .route(
            "/conversations",
            rpc(
                MethodFilter::GET,
                Route::<ListConversationsRequest>::authenticated("ListConversations").bind(
                    |req, env| {
                        let page = env.page();
                        req.group_id = env.query_param("group_id");
                        req.limit = page.limit;
                        req.offset = page.offset;
                    },
                ),
                |gw, req| async move { gw.conversations().list_conversations(req).await },
            ),
        )
        .route(
            "/conversations/{conversation_id}",
            rpc(
                MethodFilter::GET,
                Route::<GetConversationRequest>::authenticated("GetConversation")
                    .bind(|req, env| req.conversation_id = env.path_param("conversation_id")),
                |gw, req| async move { gw.conversations().get_conversation(req).await },
            ),
        )
        .route(
            "/conversations/{conversation_id}",
            rpc(
                MethodFilter::PATCH,
                Route::<UpdateConversationRequest>::authenticated("UpdateConversation")
                    .json_body()
                    .bind(|req, env| req.conversation_id = env.path_param("conversation_id")),
                |gw, req| async move { gw.conversations().update_conversation(req).await },
            ),
        )
        .route(
            "/conversations/{conversation_id}",
            rpc(
                MethodFilter::DELETE,
                Route::<DeleteConversationRequest>::authenticated("DeleteConversation")
                    .bind(|req, env| req.conversation_id = env.path_param("conversation_id")),
                |gw, req| async move { gw.conversations().delete_conversation(req).await },
            ),
        )
        .merge(messages())
}

fn messages() -> Router<Gateway> {
    Router::new()
        .route(
            "/conversations/{conversation_id}/messages",
            rpc(
                MethodFilter::POST,
                Route::<SendConversationMessageRequest>::authenticated("SendConversationMessage")
                    .json_body()
                    .bind(|req, env| req.conversation_id = env.path_param("conversation_id")),
                |gw, req| async move { gw.conversations().send_conversation_message(req).await },
            ),
        )
        .route(
            "/conversations/{conversation_id}/messages",
            rpc(
                MethodFilter::GET,
                Route::<ListConversationMessagesRequest>::authenticated("ListConversationMessages")
                    .bind(|req, env| {
                        let page = env.page();
                        req.conversation_id = env.path_param("conversation_id");
                        req.limit = page.limit;
                        req.offset = page.offset;
                    }),
                |gw, req| async move { gw.conversations().list_conversation_messages(req).await },
            ),
        )
        .route(
            "/conversations/{conversation_id}/messages/{message_id}",
            rpc(
                MethodFilter::GET,
                Route::<GetConversationMessageRequest>::authenticated("GetConversationMessage")
                    .bind(|req, env| {
                        req.conversation_id = env.path_param("conversation_id");
                        req.message_id = env.path_param("message_id");
                    }),
                |gw, req| async move { gw.conversations().get_conversation_message(req).await },
            ),
        )
        .route(
            "/conversations/{conversation_id}/messages/{message_id}",
            rpc(
                MethodFilter::PATCH,
                Route::<UpdateConversationMessageRequest>::authenticated(
                    "UpdateConversationMessage",
                )
                .json_body()
                .bind(|req, env| {
                    req.conversation_id = env.path_param("conversation_id");
                    req.message_id = env.path_param("message_id");
                }),
                |gw, req| async move { gw.conversations().update_conversation_message(req).await },
            ),
        )
        .route(
            "/conversations/{conversation_id}/messages/{message_id}",
            rpc(
                MethodFilter::DELETE,
                Route::<DeleteConversationMessageRequest>::authenticated(
                    "DeleteConversationMessage",
                )
                .bind(|req, env| {
                    req.conversation_id = env.path_param("conversation_id");
                    req.message_id = env.path_param("message_id");
                }),
                |gw, req| async move { gw.conversations().delete_conversation_message(req).await },
            ),
        )
}
