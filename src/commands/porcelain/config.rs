use crate::areas::config::Config;
use crate::areas::repository::Repository;
use crate::errors::Result;

impl Repository {
    pub fn config_list(&self) -> Result<Vec<String>> {
        let entries = self.load_config()?.list();
        for entry in &entries {
            self.emit(entry)?;
        }

        Ok(entries)
    }

    /// Value of a dotted key such as `core.bare` or `remote.origin.url`.
    pub fn config_get(&self, key: &str) -> Result<String> {
        let (section, name) = Config::split_key(key)?;
        let value = self.load_config()?.get(&section, &name)?.to_string();
        self.emit(&value)?;

        Ok(value)
    }

    pub fn config_set(&self, key: &str, value: &str) -> Result<()> {
        let (section, name) = Config::split_key(key)?;

        let mut config = self.load_config()?;
        config.set(&section, &name, value);
        config.write_updates()?;

        self.emit(format!("Set {key} to '{value}'"))
    }
}
