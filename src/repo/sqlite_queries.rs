pub const QUERY_GET_USER_BY_EMAIL: &str = r#"
SELECT
    u.id,u.name,u.email,u.password_hash,u.avatar_id,u.created_at,u.updated_at,
    f.name AS avatar_name,f.path AS avatar_path,
    f.created_at AS avatar_created_at,f.updated_at AS avatar_updated_at
FROM users AS u
LEFT JOIN files AS f ON (f.id=u.avatar_id)
WHERE u.email=$1;
"#;

pub const QUERY_GET_USER_BY_ID: &str = r#"
SELECT
    u.id,u.name,u.email,u.password_hash,u.avatar_id,u.created_at,u.updated_at,
    f.name AS avatar_name,f.path AS avatar_path,
    f.created_at AS avatar_created_at,f.updated_at AS avatar_updated_at
FROM users AS u
LEFT JOIN files AS f ON (f.id=u.avatar_id)
WHERE u.id=$1;
"#;

pub const QUERY_INSERT_USER: &str = r#"
INSERT INTO users(name,email,password_hash,created_at,updated_at)
VALUES($1,$2,$3,$4,$5);
"#;

pub const QUERY_CREATE_TABLE_FILES: &str = r#"
CREATE TABLE IF NOT EXISTS files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    path TEXT NOT NULL UNIQUE,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const QUERY_CREATE_TABLE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    avatar_id INTEGER REFERENCES files(id) ON UPDATE CASCADE ON DELETE SET NULL,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const QUERY_CREATE_TABLE_BREEDS: &str = r#"
CREATE TABLE IF NOT EXISTS breeds (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const QUERY_CREATE_TABLE_PETS: &str = r#"
CREATE TABLE IF NOT EXISTS pets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    birthday DATE,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE,
    breed_id INTEGER REFERENCES breeds(id) ON UPDATE CASCADE ON DELETE SET NULL,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const QUERY_CREATE_TABLE_PETFILES: &str = r#"
CREATE TABLE IF NOT EXISTS petfiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    path TEXT NOT NULL UNIQUE,
    pet_id INTEGER NOT NULL REFERENCES pets(id) ON UPDATE CASCADE ON DELETE CASCADE,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const QUERY_INDEX_USERS_AVATAR: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_avatar_id ON users(avatar_id);";

pub const QUERY_INDEX_PETS_OWNER: &str =
    "CREATE INDEX IF NOT EXISTS idx_pets_owner_id ON pets(owner_id);";

pub const QUERY_INDEX_PETS_BREED: &str =
    "CREATE INDEX IF NOT EXISTS idx_pets_breed_id ON pets(breed_id);";

pub const QUERY_INDEX_PETFILES_PET: &str =
    "CREATE INDEX IF NOT EXISTS idx_petfiles_pet_id ON petfiles(pet_id);";
