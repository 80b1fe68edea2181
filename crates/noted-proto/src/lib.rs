//! Protobuf schema of the noted backends.
//!
//! Messages and tonic clients are generated from `proto/` at build time.
//! Every message also derives serde, so the gateway decodes request bodies
//! straight into them and encodes responses straight out of them. JSON field
//! names are the proto field names (`snake_case`).
//!
//! - [`accounts`]: `noted.accounts.v1` (accounts, groups, invites, conversations)
//! - [`notes`]: `noted.notes.v1`
//! - [`recommendations`]: `noted.recommendations.v1`
//! - [`services`]: one trait per backend service, implemented by its generated client

#![forbid(unsafe_code)]

#[allow(clippy::all, clippy::pedantic, missing_docs)]
pub mod accounts {
    tonic::include_proto!("noted.accounts.v1");
}

#[allow(clippy::all, clippy::pedantic, missing_docs)]
pub mod notes {
    tonic::include_proto!("noted.notes.v1");
}

#[allow(clippy::all, clippy::pedantic, missing_docs)]
pub mod recommendations {
    tonic::include_proto!("noted.recommendations.v1");
}

pub mod services;

pub use accounts::accounts_api_client::AccountsApiClient;
pub use accounts::conversations_api_client::ConversationsApiClient;
pub use accounts::groups_api_client::GroupsApiClient;
pub use accounts::invites_api_client::InvitesApiClient;
pub use notes::notes_api_client::NotesApiClient;
pub use recommendations::recommendations_api_client::RecommendationsApiClient;
pub use services::{
    AccountsApi, ConversationsApi, GroupsApi, InvitesApi, NotesApi, RecommendationsApi,
};

/// `#[serde(with)]` modules for proto enum fields.
pub(crate) mod serde_enums {
    noted_rest::proto_enum_serde!(block_type, crate::notes::block::Type);
    noted_rest::proto_enum_serde!(note_export_format, crate::notes::NoteExportFormat);
}

#[cfg(test)]
mod tests {
    use super::accounts::{Group, UpdateAccountRequest};
    use super::notes::{block, Block, ExportNoteRequest, NoteExportFormat};
    use pretty_assertions::assert_eq;

    #[test]
    fn enum_fields_use_proto_names() {
        let block = Block {
            id: "b1".to_owned(),
            r#type: block::Type::Heading2 as i32,
            content: "Intro".to_owned(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "b1", "type": "TYPE_HEADING_2", "content": "Intro" })
        );

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn export_format_accepts_number() {
        let req: ExportNoteRequest =
            serde_json::from_str(r#"{"note_id":"n1","export_format":2}"#).unwrap();
        assert_eq!(req.export_format(), NoteExportFormat::Pdf);
    }

    #[test]
    fn zero_values_are_emitted() {
        let json = serde_json::to_value(Group::default()).unwrap();
        assert_eq!(json["name"], "");
        assert_eq!(json["created_at"], serde_json::Value::Null);
        assert_eq!(json["members"], serde_json::json!([]));
    }

    #[test]
    fn nested_message_and_mask_decode() {
        let req: UpdateAccountRequest = serde_json::from_str(
            r#"{"account":{"id":"a1","name":"Ada"},"update_mask":"name","extra":true}"#,
        )
        .unwrap();
        let account = req.account.unwrap();
        assert_eq!(account.name, "Ada");
        assert_eq!(account.email, "");
        assert_eq!(req.update_mask.unwrap().paths, vec!["name".to_owned()]);
    }

    #[test]
    fn prost_and_json_agree() {
        use prost::Message;

        let block = Block {
            id: "b1".to_owned(),
            r#type: block::Type::Code as i32,
            content: "fn main() {}".to_owned(),
        };
        let wire = Block::decode(block.encode_to_vec().as_slice()).unwrap();
        let json: Block = serde_json::from_slice(&serde_json::to_vec(&block).unwrap()).unwrap();
        assert_eq!(wire, json);
    }

    #[test]
    fn wire_tags_follow_the_schema() {
        use prost::Message;

        let req = ExportNoteRequest {
            note_id: "n1".to_owned(),
            export_format: NoteExportFormat::Pdf as i32,
        };
        // field 1 (len-delimited "n1"), field 2 (varint 2)
        assert_eq!(req.encode_to_vec(), vec![0x0a, 2, b'n', b'1', 0x10, 2]);
    }

    #[test]
    fn nested_block_type_reads_by_name() {
        let block: Block = serde_json::from_str(r#"{"type":"TYPE_IMAGE"}"#).unwrap();
        assert_eq!(block.r#type(), block::Type::Image);
        assert_eq!(block.id, "");
    }
}
