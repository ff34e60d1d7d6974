//! Diesel schema definitions.

diesel::table! {
    profiles (id) {
        id -> Uuid,
        fcm_token -> Nullable<Text>,
    }
}
