//! Backend service traits, implemented by the generated tonic clients.
//!
//! Handlers only see the traits, so tests can swap any backend for an
//! in-process implementation.

use tonic::transport::Channel;
use tonic::{Request, Response, Status};

use crate::accounts::*;
use crate::notes::*;
use crate::recommendations::*;
use crate::{
    AccountsApiClient, ConversationsApiClient, GroupsApiClient, InvitesApiClient, NotesApiClient,
    RecommendationsApiClient,
};

macro_rules! service {
    (
        $(#[$doc:meta])*
        $api:ident for $client:ident {
            $( $method:ident($rpc:literal): $req:ty => $res:ty; )*
        }
    ) => {
        $(#[$doc])*
        #[tonic::async_trait]
        pub trait $api: Send + Sync + 'static {
            $(
                #[doc = concat!("`", $rpc, "`")]
                async fn $method(&self, request: Request<$req>) -> Result<Response<$res>, Status>;
            )*
        }

        // Generated clients take `&mut self`; clones share one channel.
        #[tonic::async_trait]
        impl $api for $client<Channel> {
            $(
                async fn $method(&self, request: Request<$req>) -> Result<Response<$res>, Status> {
                    <$client<Channel>>::$method(&mut self.clone(), request).await
                }
            )*
        }
    };
}

service! {
    /// Account lifecycle and authentication.
    AccountsApi for AccountsApiClient {
        create_account("CreateAccount"): CreateAccountRequest => CreateAccountResponse;
        authenticate("Authenticate"): AuthenticateRequest => AuthenticateResponse;
        get_account("GetAccount"): GetAccountRequest => GetAccountResponse;
        update_account("UpdateAccount"): UpdateAccountRequest => UpdateAccountResponse;
        delete_account("DeleteAccount"): DeleteAccountRequest => DeleteAccountResponse;
        list_accounts("ListAccounts"): ListAccountsRequest => ListAccountsResponse;
    }
}

service! {
    /// Groups, their members, and the notes shared into them.
    GroupsApi for GroupsApiClient {
        create_group("CreateGroup"): CreateGroupRequest => CreateGroupResponse;
        get_group("GetGroup"): GetGroupRequest => GetGroupResponse;
        update_group("UpdateGroup"): UpdateGroupRequest => UpdateGroupResponse;
        delete_group("DeleteGroup"): DeleteGroupRequest => DeleteGroupResponse;
        list_groups("ListGroups"): ListGroupsRequest => ListGroupsResponse;
        get_member("GetMember"): GetMemberRequest => GetMemberResponse;
        update_member("UpdateMember"): UpdateMemberRequest => UpdateMemberResponse;
        remove_member("RemoveMember"): RemoveMemberRequest => RemoveMemberResponse;
        list_members("ListMembers"): ListMembersRequest => ListMembersResponse;
        add_group_note("AddGroupNote"): AddGroupNoteRequest => AddGroupNoteResponse;
        get_group_note("GetGroupNote"): GetGroupNoteRequest => GetGroupNoteResponse;
        update_group_note("UpdateGroupNote"): UpdateGroupNoteRequest => UpdateGroupNoteResponse;
        remove_group_note("RemoveGroupNote"): RemoveGroupNoteRequest => RemoveGroupNoteResponse;
        list_group_notes("ListGroupNotes"): ListGroupNotesRequest => ListGroupNotesResponse;
    }
}

service! {
    /// Group invitations.
    InvitesApi for InvitesApiClient {
        send_invite("SendInvite"): SendInviteRequest => SendInviteResponse;
        get_invite("GetInvite"): GetInviteRequest => GetInviteResponse;
        accept_invite("AcceptInvite"): AcceptInviteRequest => AcceptInviteResponse;
        deny_invite("DenyInvite"): DenyInviteRequest => DenyInviteResponse;
        list_invites("ListInvites"): ListInvitesRequest => ListInvitesResponse;
    }
}

service! {
    /// Group conversations and their messages.
    ConversationsApi for ConversationsApiClient {
        create_conversation("CreateConversation"): CreateConversationRequest => CreateConversationResponse;
        get_conversation("GetConversation"): GetConversationRequest => GetConversationResponse;
        update_conversation("UpdateConversation"): UpdateConversationRequest => UpdateConversationResponse;
        delete_conversation("DeleteConversation"): DeleteConversationRequest => DeleteConversationResponse;
        list_conversations("ListConversations"): ListConversationsRequest => ListConversationsResponse;
        send_conversation_message("SendConversationMessage"): SendConversationMessageRequest => SendConversationMessageResponse;
        get_conversation_message("GetConversationMessage"): GetConversationMessageRequest => GetConversationMessageResponse;
        update_conversation_message("UpdateConversationMessage"): UpdateConversationMessageRequest => UpdateConversationMessageResponse;
        delete_conversation_message("DeleteConversationMessage"): DeleteConversationMessageRequest => DeleteConversationMessageResponse;
        list_conversation_messages("ListConversationMessages"): ListConversationMessagesRequest => ListConversationMessagesResponse;
    }
}

service! {
    /// Notes and their blocks.
    NotesApi for NotesApiClient {
        create_note("CreateNote"): CreateNoteRequest => CreateNoteResponse;
        get_note("GetNote"): GetNoteRequest => GetNoteResponse;
        update_note("UpdateNote"): UpdateNoteRequest => UpdateNoteResponse;
        delete_note("DeleteNote"): DeleteNoteRequest => DeleteNoteResponse;
        list_notes("ListNotes"): ListNotesRequest => ListNotesResponse;
        insert_block("InsertBlock"): InsertBlockRequest => InsertBlockResponse;
        update_block("UpdateBlock"): UpdateBlockRequest => UpdateBlockResponse;
        delete_block("DeleteBlock"): DeleteBlockRequest => DeleteBlockResponse;
        export_note("ExportNote"): ExportNoteRequest => ExportNoteResponse;
    }
}

service! {
    /// Keyword extraction.
    RecommendationsApi for RecommendationsApiClient {
        extract_keywords("ExtractKeywords"): ExtractKeywordsRequest => ExtractKeywordsResponse;
    }
}
