const LOGGER_CONFIG_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(error) = log4rs::init_file(LOGGER_CONFIG_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOGGER_CONFIG_FILE, error
        );
    }
}

pub fn log_header(direction: &str, header: &[u8]) {
    fn get_byte_array(bytes: &[u8]) -> Vec<String> {
        bytes.iter().map(|byte| format!("{:02X}", byte)).collect()
    }
    log::debug!(
        "{} BMP header ({} bytes)\n{:?}",
        direction,
        header.len(),
        get_byte_array(header)
    );
}
