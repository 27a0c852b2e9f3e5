use rusqlite::Connection;
use yasite_core::config::DUPLICATE_SLUG_SUFFIX;
use yasite_core::db::open_db_in_memory;
use yasite_core::{
    Field, Identity, Note, NoteDraft, NoteForm, NoteRepository, NoteService, Outcome, RepoError,
    SiteConfig, SqliteNoteRepository, SqliteUserRepository, User, UserId, UserRepository,
};

const NOTE_TEXT: &str = "Текст заметки";
const NEW_NOTE_TEXT: &str = "Обновлённая заметка";

struct Fixture {
    conn: Connection,
    author: UserId,
    reader: UserId,
}

impl Fixture {
    fn new() -> Self {
        let conn = open_db_in_memory().unwrap();
        let (author, reader) = {
            let users = SqliteUserRepository::try_new(&conn).unwrap();
            (
                users.create_user(&User::new("Автор заметки")).unwrap(),
                users.create_user(&User::new("Читатель")).unwrap(),
            )
        };
        Self {
            conn,
            author,
            reader,
        }
    }

    fn service(&self) -> NoteService<SqliteNoteRepository<'_>> {
        NoteService::new(self.repo(), SiteConfig::default())
    }

    fn repo(&self) -> SqliteNoteRepository<'_> {
        SqliteNoteRepository::try_new(&self.conn).unwrap()
    }

    fn existing_note(&self) -> Note {
        self.repo()
            .create_note(
                self.author,
                &NoteDraft {
                    title: "Заголовок".to_string(),
                    text: NOTE_TEXT.to_string(),
                    slug: "zagolovok".to_string(),
                },
            )
            .unwrap()
    }
}

#[test]
fn user_can_create_note() {
    let fx = Fixture::new();
    let outcome = fx
        .service()
        .add_note(
            &Identity::User(fx.author),
            &NoteForm::new("Заголовок", NOTE_TEXT).with_slug("my-note"),
        )
        .unwrap();

    assert_eq!(outcome, Outcome::Redirect("/done/".to_string()));
    assert_eq!(fx.repo().count_notes().unwrap(), 1);
    let note = fx.repo().get_note_by_slug("my-note").unwrap().unwrap();
    assert_eq!(note.title, "Заголовок");
    assert_eq!(note.text, NOTE_TEXT);
    assert_eq!(note.author, fx.author);
}

#[test]
fn anonymous_user_cant_create_note() {
    let fx = Fixture::new();
    let outcome = fx
        .service()
        .add_note(&Identity::Anonymous, &NoteForm::new("Заголовок", NOTE_TEXT))
        .unwrap();

    assert_eq!(outcome.status().code(), 302);
    assert_eq!(outcome.location().as_deref(), Some("/auth/login/?next=/add/"));
    assert_eq!(fx.repo().count_notes().unwrap(), 0);
}

#[test]
fn not_unique_slug_is_rejected_with_slug_in_message() {
    let fx = Fixture::new();
    let note = fx.existing_note();

    let outcome = fx
        .service()
        .add_note(
            &Identity::User(fx.author),
            &NoteForm::new("Другой заголовок", NOTE_TEXT).with_slug(note.slug.clone()),
        )
        .unwrap();

    assert_eq!(outcome.status().code(), 200);
    let expected = format!("{}{DUPLICATE_SLUG_SUFFIX}", note.slug);
    assert_eq!(outcome.field_errors(Field::Slug), vec![expected.as_str()]);
    assert_eq!(fx.repo().count_notes().unwrap(), 1);
}

#[test]
fn derived_slug_collision_is_global_across_authors() {
    let fx = Fixture::new();
    fx.existing_note();

    // Same title by another user derives the same slug.
    let outcome = fx
        .service()
        .add_note(&Identity::User(fx.reader), &NoteForm::new("Заголовок", "Другой текст"))
        .unwrap();

    assert_eq!(
        outcome.field_errors(Field::Slug),
        vec![format!("zagolovok{DUPLICATE_SLUG_SUFFIX}").as_str()]
    );
    assert_eq!(fx.repo().count_notes().unwrap(), 1);
    assert!(fx.repo().list_by_author(fx.reader).unwrap().is_empty());
}

#[test]
fn automatic_creation_slug() {
    let fx = Fixture::new();
    let outcome = fx
        .service()
        .add_note(&Identity::User(fx.author), &NoteForm::new("Апандра", NOTE_TEXT))
        .unwrap();

    assert_eq!(outcome, Outcome::Redirect("/done/".to_string()));
    let notes = fx.repo().list_by_author(fx.author).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].slug, "apandra");
}

#[test]
fn store_reports_slug_conflict_from_the_write() {
    let fx = Fixture::new();
    let note = fx.existing_note();

    let err = fx
        .repo()
        .create_note(
            fx.reader,
            &NoteDraft {
                title: "Другое".to_string(),
                text: "Текст".to_string(),
                slug: note.slug.clone(),
            },
        )
        .unwrap_err();
    match err {
        RepoError::Conflict { field, value } => {
            assert_eq!(field, "slug");
            assert_eq!(value, note.slug);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn author_can_edit_note() {
    let fx = Fixture::new();
    let note = fx.existing_note();

    let outcome = fx
        .service()
        .edit_note(
            &Identity::User(fx.author),
            &note.slug,
            &NoteForm::new("Заголовок", NEW_NOTE_TEXT),
        )
        .unwrap();

    assert_eq!(outcome.status().code(), 302);
    assert_eq!(outcome.location().as_deref(), Some("/done/"));
    let reloaded = fx.repo().get_note_by_slug(&note.slug).unwrap().unwrap();
    assert_eq!(reloaded.title, note.title);
    assert_eq!(reloaded.text, NEW_NOTE_TEXT);
    assert_eq!(reloaded.slug, note.slug);
    assert_eq!(reloaded.author, fx.author);
}

#[test]
fn edit_cannot_take_another_notes_slug() {
    let fx = Fixture::new();
    let first = fx.existing_note();
    let second = fx
        .repo()
        .create_note(
            fx.author,
            &NoteDraft {
                title: "Второй".to_string(),
                text: NOTE_TEXT.to_string(),
                slug: "vtoroj".to_string(),
            },
        )
        .unwrap();

    let outcome = fx
        .service()
        .edit_note(
            &Identity::User(fx.author),
            &second.slug,
            &NoteForm::new("Второй", NEW_NOTE_TEXT).with_slug(first.slug.clone()),
        )
        .unwrap();

    assert!(matches!(outcome, Outcome::ValidationFailed(_)));
    let reloaded = fx.repo().get_note_by_slug(&second.slug).unwrap().unwrap();
    assert_eq!(reloaded, second);
}

#[test]
fn other_user_cant_edit_note() {
    let fx = Fixture::new();
    let note = fx.existing_note();

    let outcome = fx
        .service()
        .edit_note(
            &Identity::User(fx.reader),
            &note.slug,
            &NoteForm::new("Заголовок", NEW_NOTE_TEXT),
        )
        .unwrap();

    assert_eq!(outcome.status().code(), 404);
    let reloaded = fx.repo().get_note_by_slug(&note.slug).unwrap().unwrap();
    assert_eq!(reloaded, note);
}

#[test]
fn author_can_delete_note() {
    let fx = Fixture::new();
    let note = fx.existing_note();

    let outcome = fx
        .service()
        .delete_note(&Identity::User(fx.author), &note.slug)
        .unwrap();

    assert_eq!(outcome, Outcome::Redirect("/done/".to_string()));
    assert_eq!(fx.repo().count_notes().unwrap(), 0);
}

#[test]
fn other_user_cant_delete_note() {
    let fx = Fixture::new();
    let note = fx.existing_note();

    let outcome = fx
        .service()
        .delete_note(&Identity::User(fx.reader), &note.slug)
        .unwrap();

    assert_eq!(outcome.status().code(), 404);
    assert_eq!(fx.repo().count_notes().unwrap(), 1);
}

#[test]
fn anonymous_edit_and_delete_are_not_found() {
    let fx = Fixture::new();
    let note = fx.existing_note();
    let service = fx.service();

    let edit = service
        .edit_note(&Identity::Anonymous, &note.slug, &NoteForm::new("X", "Y"))
        .unwrap();
    let delete = service.delete_note(&Identity::Anonymous, &note.slug).unwrap();

    assert_eq!(edit, Outcome::NotFound);
    assert_eq!(delete, Outcome::NotFound);
    assert_eq!(fx.repo().get_note_by_slug(&note.slug).unwrap().unwrap(), note);
}
