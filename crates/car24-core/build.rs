// Generate wire messages and gRPC clients from the shared protobuf definitions

const PROTO_DIR: &str = "../../proto";

const PROTO_FILES: &[&str] = &["common.proto", "client_service.proto", "order_service.proto"];

/// Derives for messages the gateway binds from and renders to JSON.
const JSON_DERIVES: &str = "#[derive(serde::Serialize, serde::Deserialize, utoipa::ToSchema)]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={PROTO_DIR}");

    // protox parses the files in-process, so no protoc is needed
    let file_descriptors = protox::compile(PROTO_FILES, [PROTO_DIR])?;

    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .type_attribute(".client_service", JSON_DERIVES)
        .type_attribute(".client_service", "#[serde(default)]")
        .type_attribute(".order_service", JSON_DERIVES)
        .type_attribute(".order_service", "#[serde(default)]")
        .compile_fds(file_descriptors)?;

    Ok(())
}
