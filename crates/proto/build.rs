fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure()
        .build_client(true)
        // Server stubs are only exercised by integration tests (mock
        // backend), but generating them here keeps one source of truth.
        .build_server(true)
        .compile_protos(&["proto/dataapi/v1/data_api.proto"], &["proto"])?;
    Ok(())
}
