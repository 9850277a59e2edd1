use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Print the content of blob `object_id`, stored for working file `name`
    pub fn cat_file(&self, object_id: &str, name: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id.to_ascii_lowercase())?;
        let content = self.database().load_blob(&object_id, Some(name))?;

        self.writer().write_all(&content)?;

        Ok(())
    }
}
