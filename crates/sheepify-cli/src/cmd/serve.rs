use sheepify_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, port: u16) -> anyhow::Result<()> {
    // Fail fast if the farm isn't set up; the server would otherwise 400
    // every request.
    Config::load(root)?;

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();
    rt.block_on(sheepify_server::serve(root_buf, port))
}
