use kernel::id::{Id, markers};

pub type UserMarker = markers::User;

/// Store-assigned user identifier
pub type UserId = Id<UserMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_store_value() {
        let user_id = UserId::from_i32(1);
        assert_eq!(user_id.value(), 1);
        assert_eq!(user_id, UserId::from(1));
    }
}
