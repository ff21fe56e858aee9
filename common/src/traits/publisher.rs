use crate::types::Callback;
use uuid::Uuid;

pub trait Notifiable: Sync + Send {
    fn get_callback(&self) -> Callback;
    fn set_id(&mut self, id: Uuid);
}
