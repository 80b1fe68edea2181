//! Generates the noted messages and tonic clients from `proto/`.
//!
//! Every message derives serde with `#[serde(default)]`, so absent JSON
//! fields decode to their proto zero value. Well-known types and enum fields
//! get a `#[serde(with)]` adapter so JSON carries RFC 3339 timestamps,
//! comma-joined field masks and enum value names.

const PROTOS: &[&str] = &[
    "proto/noted/accounts/v1/accounts.proto",
    "proto/noted/notes/v1/notes.proto",
    "proto/noted/recommendations/v1/recommendations.proto",
];

const TIMESTAMPS: &[&str] = &[
    ".noted.accounts.v1.Group.created_at",
    ".noted.accounts.v1.GroupMember.joined_at",
    ".noted.accounts.v1.Invite.valid_until",
    ".noted.accounts.v1.Conversation.created_at",
    ".noted.accounts.v1.ConversationMessage.created_at",
    ".noted.notes.v1.Note.created_at",
    ".noted.notes.v1.Note.modified_at",
];

const FIELD_MASKS: &[&str] = &[
    ".noted.accounts.v1.UpdateAccountRequest.update_mask",
    ".noted.accounts.v1.UpdateGroupRequest.update_mask",
    ".noted.accounts.v1.UpdateMemberRequest.update_mask",
    ".noted.accounts.v1.UpdateGroupNoteRequest.update_mask",
    ".noted.notes.v1.UpdateNoteRequest.update_mask",
];

const ENUMS: &[(&str, &str)] = &[
    (".noted.notes.v1.Block.type", "crate::serde_enums::block_type"),
    (
        ".noted.notes.v1.ExportNoteRequest.export_format",
        "crate::serde_enums::note_export_format",
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/");

    let mut builder = tonic_prost_build::configure()
        .build_server(false)
        .build_client(true)
        .message_attribute(
            ".",
            "#[derive(serde::Serialize, serde::Deserialize)] #[serde(default)]",
        );

    for path in TIMESTAMPS {
        builder = builder.field_attribute(
            path,
            "#[serde(with = \"noted_rest::serde::opt_timestamp\")]",
        );
    }
    for path in FIELD_MASKS {
        builder = builder.field_attribute(
            path,
            "#[serde(with = \"noted_rest::serde::opt_field_mask\")]",
        );
    }
    for (path, module) in ENUMS {
        builder = builder.field_attribute(path, format!("#[serde(with = \"{module}\")]"));
    }

    builder.compile_protos(PROTOS, &["proto"])?;
    Ok(())
}
