//! Diesel table definitions.
//!
//! Must match `migrations/` exactly.

diesel::table! {
    /// Live mounts. Colour names are copied from the catalogue on write.
    mounts (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        gender -> Varchar,
        mount_type -> Varchar,
        color_id -> Uuid,
        color -> Jsonb,
        max_number_of_child -> Int4,
        number_of_child -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Coupling records with JSONB parent snapshots.
    ///
    /// `dad_name` and `mom_name` duplicate the snapshot names so prefix
    /// search can use plain text indexes.
    couplings (id) {
        id -> Uuid,
        user_id -> Uuid,
        dad -> Jsonb,
        mom -> Jsonb,
        dad_name -> Varchar,
        mom_name -> Varchar,
        child_name -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One settings row per user (`user_id` is unique).
    account_settings (id) {
        id -> Uuid,
        user_id -> Uuid,
        mount_types -> Array<Text>,
        server_name -> Nullable<Varchar>,
        ig_username -> Nullable<Varchar>,
        auto_fill_child_name -> Bool,
    }
}

diesel::table! {
    /// Known game servers.
    servers (name) {
        name -> Varchar,
    }
}

diesel::table! {
    /// Colour catalogue per mount type.
    mount_colors (id) {
        id -> Uuid,
        mount_type -> Varchar,
        name_en -> Varchar,
        name_fr -> Varchar,
    }
}

diesel::allow_tables_to_appear_in_same_query!(mounts, couplings, account_settings, servers, mount_colors);
