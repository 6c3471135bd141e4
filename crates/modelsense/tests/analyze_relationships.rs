mod support;
use support::*;

use modelsense::analyze::{analyze_relationships, find_back_reference, Cardinality, Resolution};
use modelsense::schema::{Field, Model, Relation};
use modelsense::{analyze_model, AnalyzerConfig, Schema};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

fn summary(schema: &Schema, name: &str) -> Vec<(String, Cardinality, Resolution)> {
    let analysis = analyze_relationships(model(schema, name), schema, &config());
    assert_empty!(analysis.errors);

    analysis
        .value
        .relationships
        .iter()
        .map(|r| (r.name().to_string(), r.cardinality, r.resolution))
        .collect()
}

#[test]
fn post_belongs_to_user() {
    let schema = blog();
    let analysis = analyze_relationships(model(&schema, "Post"), &schema, &config()).value;

    let author = analysis.get("author").unwrap();
    assert!(author.is_many_to_one());
    assert_eq!(author.resolution, Resolution::BackReference);
    assert_eq!(author.target.name, "User");
    assert_eq!(author.back_reference.unwrap().name, "posts");
    assert!(author.should_auto_include);
    assert!(!author.is_self_referential());

    assert!(!analysis.is_junction_table);
    assert_eq!(analysis.auto_include.len(), 1);
    assert_eq!(analysis.auto_include[0].name(), "author");
}

#[test]
fn user_has_many_posts() {
    let schema = blog();
    let analysis = analyze_relationships(model(&schema, "User"), &schema, &config()).value;

    let posts = analysis.get("posts").unwrap();
    assert!(posts.is_one_to_many());
    assert_eq!(posts.back_reference.unwrap().name, "author");
    assert!(!posts.should_auto_include);
    assert_empty!(analysis.auto_include);
}

#[test]
fn junction_relations_are_not_auto_included() {
    let schema = roles();
    let analysis = analyze_relationships(model(&schema, "UserRole"), &schema, &config()).value;

    assert!(analysis.is_junction_table);
    assert_eq!(analysis.relationships.len(), 2);
    for relationship in &analysis.relationships {
        assert!(relationship.is_many_to_one(), "{}", relationship.name());
        assert!(!relationship.should_auto_include);
    }
    assert_empty!(analysis.auto_include);
}

#[test]
fn list_paired_with_junction_is_one_to_many() {
    let schema = roles();
    assert_eq!(
        summary(&schema, "User"),
        [("roles".to_string(), Cardinality::OneToMany, Resolution::BackReference)]
    );
}

#[test]
fn unpaired_list_into_junction_is_many_to_many() {
    let user = Model::new("User")
        .with_field(id())
        .with_field(has_many("roles", "UserRole"));
    let user_role = Model::new("UserRole")
        .with_field(int("userId"))
        .with_field(int("roleId"))
        .with_field(int("scopeId"))
        .with_field(belongs_to("role", "Role", "roleId"))
        .with_field(belongs_to("scope", "Scope", "scopeId"))
        .with_primary_key(["userId", "roleId", "scopeId"]);
    let role = Model::new("Role")
        .with_field(id())
        .with_field(string("name"));
    let scope = Model::new("Scope").with_field(id());
    let schema = Schema::from_models([user, user_role, role, scope]).unwrap();

    assert_eq!(
        summary(&schema, "User"),
        [("roles".to_string(), Cardinality::ManyToMany, Resolution::JunctionTable)]
    );
    assert_eq!(
        summary(&schema, "UserRole"),
        [
            ("role".to_string(), Cardinality::ManyToOne, Resolution::ForeignKey),
            ("scope".to_string(), Cardinality::ManyToOne, Resolution::ForeignKey),
        ]
    );
}

fn comments() -> Schema {
    let post = Model::new("Post")
        .with_field(id())
        .with_field(string("title"))
        .with_field(has_many("comments", "Comment"));
    let comment = Model::new("Comment")
        .with_field(id())
        .with_field(string("body"))
        .with_field(int("postId"))
        .with_field(belongs_to("post", "Post", "postId"));

    Schema::from_models([post, comment]).unwrap()
}

#[test]
fn child_with_one_parent_is_not_a_junction() {
    let schema = comments();
    let analysis = assert_ok!(analyze_model(model(&schema, "Comment"), &schema, &config()));

    assert!(!analysis.is_junction_table);

    let post = assert_some!(analysis.relationship("post"));
    assert!(post.is_many_to_one());
    assert!(post.should_auto_include);

    let graph = assert_some!(modelsense::analyze::generate_include_object(&analysis));
    assert_eq!(graph.get("post"), Some(true));
}

#[test]
fn unpaired_list_into_plain_child_is_one_to_many() {
    let author = Model::new("Author")
        .with_field(id())
        .with_field(has_many("books", "Book"));
    let book = Model::new("Book")
        .with_field(id())
        .with_field(string("title"))
        .with_field(int("publisherId"))
        .with_field(belongs_to("publisher", "Publisher", "publisherId"));
    let publisher = Model::new("Publisher").with_field(id());
    let schema = Schema::from_models([author, book, publisher]).unwrap();

    assert_eq!(
        summary(&schema, "Author"),
        [("books".to_string(), Cardinality::OneToMany, Resolution::List)]
    );
}

#[test]
fn unique_foreign_key_is_one_to_one() {
    let user = Model::new("User").with_field(id());
    let profile = Model::new("Profile")
        .with_field(id())
        .with_field(int("userId").unique())
        .with_field(belongs_to("user", "User", "userId"));
    let schema = Schema::from_models([user, profile]).unwrap();

    assert_eq!(
        summary(&schema, "Profile"),
        [("user".to_string(), Cardinality::OneToOne, Resolution::ForeignKey)]
    );
}

#[test]
fn composite_foreign_key_needs_matching_unique_set() {
    let account = Model::new("Account")
        .with_field(int("tenantId"))
        .with_field(int("number"))
        .with_primary_key(["tenantId", "number"]);

    let settings = |unique: &[&str]| {
        Model::new("Settings")
            .with_field(id())
            .with_field(int("tenantId"))
            .with_field(int("accountNumber"))
            .with_field(Field::relation(
                "account",
                Relation::new("Account")
                    .key(["tenantId", "accountNumber"])
                    .references(["tenantId", "number"]),
            ))
            .with_unique(unique.iter().copied())
    };

    let schema =
        Schema::from_models([account.clone(), settings(&["accountNumber", "tenantId"])]).unwrap();
    assert_eq!(summary(&schema, "Settings")[0].1, Cardinality::OneToOne);

    let schema = Schema::from_models([account, settings(&["tenantId"])]).unwrap();
    assert_eq!(summary(&schema, "Settings")[0].1, Cardinality::ManyToOne);
}

#[test]
fn self_relation_pairs_with_its_inverse() {
    let schema = Schema::from_models([category()]).unwrap();
    let analysis = analyze_relationships(model(&schema, "Category"), &schema, &config()).value;

    let parent = analysis.get("parent").unwrap();
    assert!(parent.is_many_to_one());
    assert!(parent.is_self_referential());
    assert_eq!(parent.back_reference.unwrap().name, "children");

    let children = analysis.get("children").unwrap();
    assert!(children.is_one_to_many());
    assert_eq!(children.back_reference.unwrap().name, "parent");
}

fn messages(tagged: bool) -> Schema {
    let tag = |relation: Relation, name: &str| {
        if tagged {
            relation.tagged(name)
        } else {
            relation
        }
    };

    let user = Model::new("User")
        .with_field(id())
        .with_field(Field::relation("sent", tag(Relation::new("Message"), "sent")).list())
        .with_field(Field::relation("received", tag(Relation::new("Message"), "received")).list());

    let message = Model::new("Message")
        .with_field(id())
        .with_field(string("body"))
        .with_field(timestamp("sentAt"))
        .with_field(int("senderId"))
        .with_field(int("recipientId"))
        .with_field(Field::relation(
            "sender",
            tag(Relation::new("User").key(["senderId"]), "sent"),
        ))
        .with_field(Field::relation(
            "recipient",
            tag(Relation::new("User").key(["recipientId"]), "received"),
        ));

    Schema::from_models([user, message]).unwrap()
}

#[test]
fn tags_pick_between_parallel_relations() {
    let schema = messages(true);
    let user = model(&schema, "User");
    let message = model(&schema, "Message");

    let sender = message.field_by_name("sender").unwrap();
    let recipient = message.field_by_name("recipient").unwrap();
    let received = user.field_by_name("received").unwrap();

    assert_eq!(find_back_reference(sender, user, message).unwrap().name, "sent");
    assert_eq!(find_back_reference(recipient, user, message).unwrap().name, "received");
    assert_eq!(find_back_reference(received, message, user).unwrap().name, "recipient");

    assert_eq!(
        summary(&schema, "User"),
        [
            ("sent".to_string(), Cardinality::OneToMany, Resolution::BackReference),
            ("received".to_string(), Cardinality::OneToMany, Resolution::BackReference),
        ]
    );
}

#[test]
fn untagged_parallel_relations_are_not_guessed() {
    let schema = messages(false);
    let user = model(&schema, "User");
    let message = model(&schema, "Message");

    for name in ["sender", "recipient"] {
        let field = message.field_by_name(name).unwrap();
        assert_none!(find_back_reference(field, user, message));
    }

    assert_eq!(
        summary(&schema, "Message"),
        [
            ("sender".to_string(), Cardinality::ManyToOne, Resolution::ForeignKey),
            ("recipient".to_string(), Cardinality::ManyToOne, Resolution::ForeignKey),
        ]
    );
    assert_eq!(
        summary(&schema, "User"),
        [
            ("sent".to_string(), Cardinality::OneToMany, Resolution::List),
            ("received".to_string(), Cardinality::OneToMany, Resolution::List),
        ]
    );
}

#[test]
fn tag_on_one_side_only_never_matches() {
    let user = Model::new("User")
        .with_field(id())
        .with_field(has_many("sent", "Message"))
        .with_field(has_many("received", "Message"));
    let message = Model::new("Message")
        .with_field(id())
        .with_field(int("senderId"))
        .with_field(int("recipientId"))
        .with_field(Field::relation(
            "sender",
            Relation::new("User").key(["senderId"]).tagged("sent"),
        ))
        .with_field(Field::relation(
            "recipient",
            Relation::new("User").key(["recipientId"]),
        ));
    let schema = Schema::from_models([user, message]).unwrap();

    let user = model(&schema, "User");
    let message = model(&schema, "Message");
    let sender = message.field_by_name("sender").unwrap();
    assert_none!(find_back_reference(sender, user, message));
}

#[test]
fn owner_of_the_only_key_is_the_inverse() {
    let user = Model::new("User")
        .with_field(id())
        .with_field(has_many("posts", "Post"))
        .with_field(Field::relation("liked", Relation::new("Post").tagged("likes")).list());
    let post = Model::new("Post")
        .with_field(id())
        .with_field(int("authorId"))
        .with_field(belongs_to("author", "User", "authorId"))
        .with_field(Field::relation("likedBy", Relation::new("User").tagged("likes")).list());
    let schema = Schema::from_models([user, post]).unwrap();

    let user = model(&schema, "User");
    let post = model(&schema, "Post");

    let posts = assert_some!(user.field_by_name("posts"));
    let author = assert_some!(post.field_by_name("author"));
    assert_eq!(assert_some!(find_back_reference(posts, post, user)).name, "author");
    assert_eq!(assert_some!(find_back_reference(author, user, post)).name, "posts");
}

#[test]
fn one_way_match_is_not_a_back_reference() {
    let user = Model::new("User")
        .with_field(id())
        .with_field(has_many("posts", "Post"))
        .with_field(has_many("liked", "Post"));
    let post = Model::new("Post")
        .with_field(id())
        .with_field(int("authorId"))
        .with_field(belongs_to("author", "User", "authorId"))
        .with_field(has_many("likedBy", "User"));
    let schema = Schema::from_models([user, post]).unwrap();

    let user = model(&schema, "User");
    let post = model(&schema, "Post");

    // `posts` would pick `author` as the only key owner, but from `author`
    // both `posts` and `liked` are candidates.
    for (field, target, source) in [
        (assert_some!(user.field_by_name("posts")), post, user),
        (assert_some!(post.field_by_name("author")), user, post),
        (assert_some!(post.field_by_name("likedBy")), user, post),
    ] {
        assert_none!(find_back_reference(field, target, source));
    }

    assert_eq!(
        summary(&schema, "Post"),
        [
            ("author".to_string(), Cardinality::ManyToOne, Resolution::ForeignKey),
            ("likedBy".to_string(), Cardinality::OneToMany, Resolution::List),
        ]
    );
}

#[test]
fn back_references_are_symmetric_across_fixtures() {
    for schema in [blog(), roles(), messages(true), comments()] {
        for source in schema.models() {
            for (field, relation) in source.relations() {
                let target = assert_some!(schema.model(&relation.target));
                let Some(inverse) = find_back_reference(field, target, source) else {
                    continue;
                };

                let back = assert_some!(find_back_reference(inverse, source, target));
                assert_eq!(back.name, field.name, "{}::{}", source.name, field.name);
            }
        }
    }
}

#[test]
fn scalar_without_key_or_inverse_is_implicit() {
    let user = Model::new("User").with_field(id());
    let profile = Model::new("Profile")
        .with_field(id())
        .with_field(Field::relation("user", Relation::new("User")));
    let schema = Schema::from_models([user, profile]).unwrap();

    assert_eq!(
        summary(&schema, "Profile"),
        [("user".to_string(), Cardinality::OneToOne, Resolution::Implicit)]
    );

    let strict = AnalyzerConfig::builder().strict_relations(true).build().unwrap();
    let analysis = analyze_relationships(model(&schema, "Profile"), &schema, &strict);
    assert_empty!(analysis.value.relationships);
    assert_eq!(analysis.errors.len(), 1);
    assert!(analysis.errors[0].is_ambiguous_relation());
    assert_eq!(analysis.errors[0].field(), Some("user"));
}

#[test]
fn unresolved_target_is_skipped_and_reported() {
    let post = Model::new("Post")
        .with_field(id())
        .with_field(int("authorId"))
        .with_field(belongs_to("author", "Usr", "authorId"))
        .with_field(int("editorId"))
        .with_field(belongs_to("editor", "User", "editorId"));
    let schema = Schema::from_models([Model::new("User").with_field(id()), post]).unwrap();

    let analysis = analyze_relationships(model(&schema, "Post"), &schema, &config());
    assert_eq!(analysis.value.relationships.len(), 1);
    assert_eq!(analysis.value.relationships[0].name(), "editor");

    assert_eq!(analysis.errors.len(), 1);
    let err = &analysis.errors[0];
    assert!(err.is_unresolved_relation());
    assert_eq!(err.model(), Some("Post"));
    assert_eq!(
        err.to_string(),
        "unresolved relation: field `Post::author` references model `Usr`, which is not defined in the schema"
    );
}
