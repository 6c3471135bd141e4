#![allow(dead_code)]

use modelsense::schema::{Enum, Field, Model, Primitive, Relation};
use modelsense::{AnalyzerConfig, Schema};

pub fn config() -> AnalyzerConfig {
    AnalyzerConfig::default()
}

pub fn id() -> Field {
    Field::primitive("id", Primitive::Int).primary_key()
}

pub fn string(name: &str) -> Field {
    Field::primitive(name, Primitive::String)
}

pub fn int(name: &str) -> Field {
    Field::primitive(name, Primitive::Int)
}

pub fn boolean(name: &str) -> Field {
    Field::primitive(name, Primitive::Boolean)
}

pub fn timestamp(name: &str) -> Field {
    Field::primitive(name, Primitive::DateTime)
}

pub fn belongs_to(name: &str, target: &str, key: &str) -> Field {
    Field::relation(name, Relation::new(target).key([key]).references(["id"]))
}

pub fn has_many(name: &str, target: &str) -> Field {
    Field::relation(name, Relation::new(target)).list()
}

pub fn user() -> Model {
    Model::new("User")
        .with_field(id())
        .with_field(string("email").unique())
        .with_field(string("name"))
        .with_field(string("password"))
        .with_field(string("apiKey"))
        .with_field(boolean("isActive"))
        .with_field(has_many("posts", "Post"))
}

pub fn post() -> Model {
    Model::new("Post")
        .with_field(id())
        .with_field(string("title"))
        .with_field(string("slug"))
        .with_field(int("tenantId"))
        .with_field(string("content"))
        .with_field(boolean("published"))
        .with_field(int("viewCount"))
        .with_field(Field::enumeration("status", "PostStatus"))
        .with_field(string("labels").list())
        .with_field(int("authorId"))
        .with_field(belongs_to("author", "User", "authorId"))
        .with_field(timestamp("createdAt").read_only())
        .with_field(timestamp("deletedAt").nullable())
        .with_unique(["slug", "tenantId"])
}

pub fn post_status() -> Enum {
    Enum::new("PostStatus", ["DRAFT", "REVIEW", "LIVE"])
}

/// `User` and `Post`, linked by `Post.author` / `User.posts`.
pub fn blog() -> Schema {
    Schema::builder()
        .model(user())
        .model(post())
        .enumeration(post_status())
        .build()
        .unwrap()
}

pub fn category() -> Model {
    Model::new("Category")
        .with_field(id())
        .with_field(string("name"))
        .with_field(string("slug").unique())
        .with_field(int("parentId").nullable())
        .with_field(
            Field::relation(
                "parent",
                Relation::new("Category")
                    .key(["parentId"])
                    .references(["id"])
                    .tagged("CategoryTree"),
            )
            .nullable(),
        )
        .with_field(
            Field::relation("children", Relation::new("Category").tagged("CategoryTree")).list(),
        )
}

pub fn user_role() -> Model {
    Model::new("UserRole")
        .with_field(int("userId"))
        .with_field(int("roleId"))
        .with_field(belongs_to("user", "User", "userId"))
        .with_field(belongs_to("role", "Role", "roleId"))
        .with_field(timestamp("createdAt"))
        .with_primary_key(["userId", "roleId"])
}

pub fn role() -> Model {
    Model::new("Role")
        .with_field(id())
        .with_field(string("name").unique())
        .with_field(has_many("users", "UserRole"))
}

/// `User` and `Role` linked through the `UserRole` junction.
pub fn roles() -> Schema {
    let user = Model::new("User")
        .with_field(id())
        .with_field(string("email").unique())
        .with_field(has_many("roles", "UserRole"));

    Schema::from_models([user, role(), user_role()]).unwrap()
}

pub fn model<'a>(schema: &'a Schema, name: &str) -> &'a Model {
    schema.model(name).unwrap()
}
