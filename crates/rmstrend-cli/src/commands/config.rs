use std::path::Path;

pub fn run(config_path: Option<&Path>) {
    super::init_logging(None);
    let config = super::load_config(config_path);
    match config.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
