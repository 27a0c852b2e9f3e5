use rusqlite::Connection;
use yasite_core::db::open_db_in_memory;
use yasite_core::{
    CommentForm, CommentRepository, Identity, NewComment, NewNewsItem, NewsRepository,
    NewsService, SiteConfig, SqliteCommentRepository, SqliteNewsRepository, SqliteUserRepository,
    User, UserId, UserRepository,
};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const TODAY_MS: i64 = 1_700_000_000_000;

fn news_service(conn: &Connection) -> NewsService<SqliteNewsRepository<'_>, SqliteCommentRepository<'_>> {
    NewsService::new(
        SqliteNewsRepository::try_new(conn).unwrap(),
        SqliteCommentRepository::try_new(conn).unwrap(),
        SiteConfig::default(),
    )
}

fn create_user(conn: &Connection, username: &str) -> UserId {
    let repo = SqliteUserRepository::try_new(conn).unwrap();
    repo.create_user(&User::new(username)).unwrap()
}

/// One more news item than fits on the home page, oldest last.
fn seed_all_news(conn: &Connection, config: &SiteConfig) {
    let repo = SqliteNewsRepository::try_new(conn).unwrap();
    for index in 0..=i64::from(config.news_count_on_home_page) {
        repo.create_news(
            &NewNewsItem::new(format!("Новость {index}"), "Просто текст.")
                .published_at(TODAY_MS - index * DAY_MS),
        )
        .unwrap();
    }
}

#[test]
fn home_page_news_count_is_capped_by_config() {
    let conn = open_db_in_memory().unwrap();
    let config = SiteConfig::default();
    seed_all_news(&conn, &config);

    let outcome = news_service(&conn).home_page(&Identity::Anonymous).unwrap();
    assert_eq!(outcome.status().code(), 200);
    let page = outcome.into_page().unwrap();
    assert_eq!(page.news.len(), config.news_count_on_home_page as usize);

    let stored = SqliteNewsRepository::try_new(&conn)
        .unwrap()
        .count_news()
        .unwrap();
    assert_eq!(stored, u64::from(config.news_count_on_home_page) + 1);
}

#[test]
fn home_page_news_are_sorted_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNewsRepository::try_new(&conn).unwrap();
    // Inserted out of order on purpose.
    for offset in [3, 0, 5, 1, 4, 2] {
        repo.create_news(
            &NewNewsItem::new(format!("Новость {offset}"), "Текст")
                .published_at(TODAY_MS - offset * DAY_MS),
        )
        .unwrap();
    }

    let page = news_service(&conn)
        .home_page(&Identity::Anonymous)
        .unwrap()
        .into_page()
        .unwrap();
    let dates: Vec<i64> = page.news.iter().map(|news| news.published_at).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    assert_eq!(page.news[0].title, "Новость 0");
}

#[test]
fn home_page_respects_custom_page_size() {
    let conn = open_db_in_memory().unwrap();
    let config = SiteConfig::from_json_str(r#"{"news_count_on_home_page": 3}"#).unwrap();
    seed_all_news(&conn, &config);

    let service = NewsService::new(
        SqliteNewsRepository::try_new(&conn).unwrap(),
        SqliteCommentRepository::try_new(&conn).unwrap(),
        config,
    );
    let page = service
        .home_page(&Identity::Anonymous)
        .unwrap()
        .into_page()
        .unwrap();
    assert_eq!(page.news.len(), 3);
}

#[test]
fn empty_home_page_renders() {
    let conn = open_db_in_memory().unwrap();
    let page = news_service(&conn)
        .home_page(&Identity::Anonymous)
        .unwrap()
        .into_page()
        .unwrap();
    assert!(page.news.is_empty());
}

#[test]
fn detail_page_contains_form_for_authenticated_user() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Автор");
    let news = SqliteNewsRepository::try_new(&conn)
        .unwrap()
        .create_news(&NewNewsItem::new("Заголовок", "Текст заметки"))
        .unwrap();

    let outcome = news_service(&conn)
        .detail_page(&Identity::User(author), news.id)
        .unwrap();
    assert_eq!(outcome.status().code(), 200);
    let page = outcome.into_page().unwrap();
    assert_eq!(page.comment_form, Some(CommentForm::default()));
    assert_eq!(page.news, news);
}

#[test]
fn detail_page_does_not_contain_form_for_anonymous() {
    let conn = open_db_in_memory().unwrap();
    let news = SqliteNewsRepository::try_new(&conn)
        .unwrap()
        .create_news(&NewNewsItem::new("Заголовок", "Текст заметки"))
        .unwrap();

    let outcome = news_service(&conn)
        .detail_page(&Identity::Anonymous, news.id)
        .unwrap();
    assert_eq!(outcome.status().code(), 200);
    assert!(outcome.page().unwrap().comment_form.is_none());
}

#[test]
fn detail_page_for_missing_news_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let outcome = news_service(&conn)
        .detail_page(&Identity::Anonymous, 404)
        .unwrap();
    assert_eq!(outcome.status().code(), 404);
}

#[test]
fn comments_are_sorted_oldest_first() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Автор");
    let news = SqliteNewsRepository::try_new(&conn)
        .unwrap()
        .create_news(&NewNewsItem::new("Заголовок", "Текст заметки"))
        .unwrap();
    let comments = SqliteCommentRepository::try_new(&conn).unwrap();
    // Later inserts get earlier timestamps for half of the thread.
    for (index, offset) in [5, 2, 9, 0, 7, 1, 8, 3, 6, 4].into_iter().enumerate() {
        comments
            .create_comment(&NewComment {
                news_id: news.id,
                author,
                text: format!("Tекст {index}"),
                created_at: Some(TODAY_MS + offset * DAY_MS),
            })
            .unwrap();
    }

    let page = news_service(&conn)
        .detail_page(&Identity::Anonymous, news.id)
        .unwrap()
        .into_page()
        .unwrap();
    assert_eq!(page.comments.len(), 10);
    let created: Vec<i64> = page.comments.iter().map(|comment| comment.created_at).collect();
    let mut sorted = created.clone();
    sorted.sort();
    assert_eq!(created, sorted);
}

#[test]
fn comments_with_equal_timestamps_keep_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Автор");
    let news = SqliteNewsRepository::try_new(&conn)
        .unwrap()
        .create_news(&NewNewsItem::new("Заголовок", "Текст"))
        .unwrap();
    let comments = SqliteCommentRepository::try_new(&conn).unwrap();
    let mut inserted = Vec::new();
    for index in 0..3 {
        let comment = comments
            .create_comment(&NewComment {
                news_id: news.id,
                author,
                text: format!("Tекст {index}"),
                created_at: Some(TODAY_MS),
            })
            .unwrap();
        inserted.push(comment.id);
    }

    let thread = comments.list_for_news(news.id).unwrap();
    let ids: Vec<i64> = thread.iter().map(|comment| comment.id).collect();
    assert_eq!(ids, inserted);
}
