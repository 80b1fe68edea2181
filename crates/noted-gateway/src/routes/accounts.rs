use axum::routing::MethodFilter;
use axum::Router;
use noted_proto::accounts::{
    Account, AuthenticateRequest, CreateAccountRequest, DeleteAccountRequest, GetAccountRequest,
    ListAccountsRequest, UpdateAccountRequest,
};
use noted_rest::Route;

use crate::dispatch::rpc;
use crate::gateway::Gateway;

pub(crate) fn router() -> Router<Gateway> {
    Router::new()
        .route(
            "/accounts",
            rpc(
                MethodFilter::POST,
                Route::<CreateAccountRequest>::public("CreateAccount").json_body(),
                |gw, req| async move { gw.accounts().create_account(req).await },
            ),
        )
        .route(
            "/authenticate",
            rpc(
                MethodFilter::POST,
                Route::<AuthenticateRequest>::public("Authenticate").json_body(),
                |gw, req| async move { gw.accounts().authenticate(req).await },
            ),
        )
        .route(
            "/accounts",
            rpc(
                MethodFilter::GET,
                Route::<ListAccountsRequest>::authenticated("ListAccounts").bind(|req, env| {
                    let page = env.page();
                    req.limit = page.limit;
                    req.offset = page.offset;
                }),
                |gw, req| async move { gw.accounts().list_accounts(req).await },
            ),
        )
        .route(
            "/accounts/{account_id}",
            rpc(
                MethodFilter::GET,
                Route::<GetAccountRequest>::authenticated("GetAccount").bind(|req, env| {
                    req.account_id = env.path_param("account_id");
                }),
                |gw, req| async move { gw.accounts().get_account(req).await },
            ),
        )
        .route(
            "/accounts/{account_id}",
            rpc(
                MethodFilter::PATCH,
                Route::<UpdateAccountRequest>::authenticated("UpdateAccount")
                    .json_body()
                    .bind(|req, env| {
                        req.account.get_or_insert_with(Account::default).id =
                            env.path_param("account_id");
                    }),
                |gw, req| async move { gw.accounts().update_account(req).await },
            ),
        )
        .route(
            "/accounts/{account_id}",
            rpc(
                MethodFilter::DELETE,
                Route::<DeleteAccountRequest>::authenticated("DeleteAccount").bind(|req, env| {
                    req.account_id = env.path_param("account_id");
                }),
                |gw, req| async move { gw.accounts().delete_account(req).await },
            ),
        )
}
