use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Print the fingerprint of working file `name`, optionally storing it
    pub fn hash_object(&self, name: &str, write: bool) -> anyhow::Result<()> {
        let blob = self.workspace().parse_blob(name)?;
        let object_id = blob.object_id()?;

        writeln!(self.writer(), "{object_id}")?;

        if !write {
            return Ok(());
        }

        self.database().store_blob(&blob)?;

        Ok(())
    }
}
