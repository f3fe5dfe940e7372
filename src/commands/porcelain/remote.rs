use crate::areas::config::Remote;
use crate::areas::repository::Repository;
use crate::errors::Result;

impl Repository {
    /// Print configured remotes, with their URL in verbose mode.
    pub fn remote_list(&self, verbose: bool) -> Result<Vec<Remote>> {
        let remotes = self.load_config()?.remotes();
        for remote in &remotes {
            if verbose {
                self.emit(format!("{}\t{}", remote.name, remote.url))?;
            } else {
                self.emit(&remote.name)?;
            }
        }

        Ok(remotes)
    }

    pub fn remote_add(&self, name: &str, url: &str) -> Result<()> {
        let mut config = self.load_config()?;
        config.add_remote(name, url)?;
        config.write_updates()?;

        tracing::info!(name, url, "remote added");
        self.emit(format!("Added remote '{name}' with URL '{url}'"))
    }

    pub fn remote_remove(&self, name: &str) -> Result<()> {
        let mut config = self.load_config()?;
        config.remove_remote(name)?;
        config.write_updates()?;

        tracing::info!(name, "remote removed");
        self.emit(format!("Removed remote '{name}'"))
    }

    pub fn remote_get_url(&self, name: &str) -> Result<String> {
        let url = self.load_config()?.remote_url(name)?.to_string();
        self.emit(&url)?;

        Ok(url)
    }

    pub fn remote_set_url(&self, name: &str, url: &str) -> Result<()> {
        let mut config = self.load_config()?;
        config.set_remote_url(name, url)?;
        config.write_updates()?;

        self.emit(format!("Changed URL for remote '{name}' to '{url}'"))
    }
}
