//! Shared registry fixtures.

use modeld2::{
    field::FieldDecl,
    registry::{AppDecl, AppModule, EntityDecl, Registry},
};

pub const LOCAL_ROOT: &str = "/srv/project/apps";
pub const VENDOR_ROOT: &str = "/venv/lib/python3.12/site-packages";

pub fn local_app(name: &str) -> AppDecl {
    AppDecl::new(AppModule::at(format!("{LOCAL_ROOT}/{name}/__init__.py")))
}

pub fn vendor_app(name: &str) -> AppDecl {
    AppDecl::new(AppModule::at(format!("{VENDOR_ROOT}/{name}/__init__.py")))
}

pub fn fk(name: &str, to: &str) -> FieldDecl {
    FieldDecl::association(name, "ForeignKey", to)
}

pub fn plain(name: &str) -> FieldDecl {
    FieldDecl::plain(name, "CharField")
}

/// A chat project with a custom user model built on a vendored abstract base.
pub fn chat_registry() -> Registry {
    Registry::new()
        .with_app(
            "auth",
            vendor_app("django/contrib/auth")
                .with_entity(
                    "AbstractBaseUser",
                    EntityDecl::new_abstract(vec![plain("password"), plain("last_login")])
                        .with_base("django.db.models.Model"),
                )
                .with_entity("Group", EntityDecl::new(vec![plain("id"), plain("name")])),
        )
        .with_app(
            "users",
            local_app("users").with_entity(
                "User",
                EntityDecl::new(vec![
                    plain("id"),
                    plain("password"),
                    plain("last_login"),
                    plain("email"),
                ])
                .with_base("auth.AbstractBaseUser"),
            ),
        )
        .with_app(
            "chat",
            local_app("chat")
                .with_entity(
                    "AbstractMessage",
                    EntityDecl::new_abstract(vec![
                        fk("user", "users.User").with_null(true),
                        fk("chat", "chat.Chat"),
                        plain("message"),
                    ])
                    .with_base("django.db.models.Model"),
                )
                .with_entity("Chat", EntityDecl::new(vec![plain("id"), plain("name")]))
                .with_entity(
                    "Vote",
                    EntityDecl::new(vec![
                        plain("id"),
                        fk("message", "chat.Message"),
                        fk("user", "users.User"),
                    ]),
                )
                .with_entity(
                    "Message",
                    EntityDecl::new(vec![
                        plain("id"),
                        fk("user", "users.User").with_null(true),
                        fk("chat", "chat.Chat"),
                        plain("message"),
                    ])
                    .with_base("AbstractMessage"),
                )
                .with_entity(
                    "Reply",
                    EntityDecl::new(vec![
                        plain("id"),
                        fk("user", "users.User").with_null(true),
                        fk("chat", "chat.Chat"),
                        plain("message"),
                        fk("parent_message", "chat.Message"),
                    ])
                    .with_base("chat.AbstractMessage"),
                ),
        )
}
