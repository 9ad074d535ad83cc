use sea_orm::sea_query::{Alias, BinOper, Expr, Func, IntoColumnRef, IntoCondition, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::entities::{
    article, article_content, article_content_image, category, city, popular_tag, province,
};
use crate::models::ai_model::InterpretedQuery;
use crate::models::catalog_model::*;
use crate::utils::geo;

const LISTING_DEFAULT_LIMIT: u64 = 20;
const PAGINATED_DEFAULT_LIMIT: u64 = 24;
const SEARCH_RESULT_LIMIT: u64 = 12;
const RECOMMEND_ARTICLE_LIMIT: u64 = 8;
const POPULAR_TAG_LIMIT: u64 = 20;

/// Per-article download total, summed from the image rows on every query.
/// There is deliberately no stored counter on `Article` to drift from.
const DOWNLOAD_SUM: &str = r#"COALESCE((SELECT SUM(i.total_download) FROM "ArticleContentImage" i WHERE i.id_article = "Article"."id"), 0)"#;

pub struct CatalogService;

impl CatalogService {
    /// Builds the WHERE predicate for article listings. This is the single
    /// source for both the row query and the paginated COUNT, so the two can
    /// never disagree on which articles are in scope.
    pub fn filter_condition(params: &ArticleFilterParams) -> Condition {
        let mut cond = Condition::all().add(article::Column::IsActive.eq(true));

        if let Some(id) = params.province_id {
            cond = cond.add(article::Column::IdProvince.eq(id));
        }
        if let Some(id) = params.category_id {
            cond = cond.add(article::Column::IdCategory.eq(id));
        }
        if let Some(v) = params.is_video {
            cond = cond.add(article::Column::IsVideo.eq(v));
        }
        if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search);
            cond = cond.add(
                Condition::any()
                    .add(lower_like(
                        (article::Entity, article::Column::Title),
                        &pattern,
                    ))
                    .add(lower_like(
                        (article::Entity, article::Column::TagsCsv),
                        &pattern,
                    )),
            );
        }

        cond
    }

    fn listing_select(cond: Condition, sort: ArticleSort) -> Select<article::Entity> {
        let select = article::Entity::find()
            .select_only()
            .column(article::Column::Id)
            .column(article::Column::Title)
            .column(article::Column::Thumbnail)
            .column(article::Column::IsVideo)
            .column(article::Column::TotalView)
            .column_as(Expr::cust(DOWNLOAD_SUM), "total_download")
            .column_as(province::Column::Name, "province_name")
            .column_as(city::Column::Name, "city_name")
            .column_as(article::Column::TagsCsv, "tags")
            .column(article::Column::PostingDate)
            .column_as(category::Column::Label, "category")
            .join(JoinType::LeftJoin, article::Relation::Province.def())
            .join(JoinType::LeftJoin, article::Relation::City.def())
            .join(JoinType::LeftJoin, article::Relation::Category.def())
            .filter(cond);

        match sort {
            ArticleSort::Popular => select.order_by_desc(article::Column::TotalView),
            ArticleSort::Downloads => select.order_by_desc(Expr::col(Alias::new("total_download"))),
            ArticleSort::Recent => select.order_by_desc(article::Column::PostingDate),
        }
    }

    fn count_select(cond: Condition) -> Select<article::Entity> {
        article::Entity::find().filter(cond)
    }

    /// AI search and recommendation row query: same joins, ordered by view
    /// count with an id tie-break so equal-view rows come back in a stable
    /// order.
    fn search_select(cond: Condition) -> Select<article::Entity> {
        article::Entity::find()
            .select_only()
            .column(article::Column::Id)
            .column(article::Column::Title)
            .column(article::Column::Thumbnail)
            .column(article::Column::IsVideo)
            .column(article::Column::TotalView)
            .column_as(province::Column::Name, "province_name")
            .column_as(city::Column::Name, "city_name")
            .column_as(article::Column::TagsCsv, "tags")
            .column(article::Column::PostingDate)
            .column_as(category::Column::Label, "category")
            .join(JoinType::LeftJoin, article::Relation::Province.def())
            .join(JoinType::LeftJoin, article::Relation::City.def())
            .join(JoinType::LeftJoin, article::Relation::Category.def())
            .filter(cond)
            .order_by_desc(article::Column::TotalView)
            .order_by_asc(article::Column::Id)
    }

    pub async fn list_articles(
        db: &DatabaseConnection,
        params: &ArticleFilterParams,
    ) -> Result<Vec<ArticleRow>, DbErr> {
        Self::listing_select(Self::filter_condition(params), params.sort_by)
            .limit(params.limit.unwrap_or(LISTING_DEFAULT_LIMIT))
            .offset(params.offset)
            .into_model::<ArticleRow>()
            .all(db)
            .await
    }

    pub async fn list_articles_paginated(
        db: &DatabaseConnection,
        params: &ArticleFilterParams,
    ) -> Result<ArticlesResponse, DbErr> {
        let cond = Self::filter_condition(params);
        let total = Self::count_select(cond.clone()).count(db).await?;

        let articles = Self::listing_select(cond, params.sort_by)
            .limit(params.limit.unwrap_or(PAGINATED_DEFAULT_LIMIT))
            .offset(params.offset)
            .into_model::<ArticleRow>()
            .all(db)
            .await?;

        let has_more = has_more_pages(params.offset, articles.len(), total);
        Ok(ArticlesResponse {
            articles,
            total,
            has_more,
        })
    }

    /// Detail view. Returns `None` for unknown or soft-deleted ids. A
    /// successful read bumps `total_view` by one, so re-reads are not
    /// idempotent; the response carries the pre-increment count.
    pub async fn get_article_detail(
        db: &DatabaseConnection,
        article_id: i32,
    ) -> Result<Option<ArticleDetailResponse>, DbErr> {
        let detail_cond = Condition::all()
            .add(article::Column::Id.eq(article_id))
            .add(article::Column::IsActive.eq(true));

        let row = article::Entity::find()
            .select_only()
            .column(article::Column::Id)
            .column(article::Column::Title)
            .column(article::Column::Thumbnail)
            .column(article::Column::IsVideo)
            .column(article::Column::VideoUrl)
            .column(article::Column::TotalView)
            .column_as(province::Column::Name, "province_name")
            .column_as(city::Column::Name, "city_name")
            .column_as(article::Column::TagsCsv, "tags")
            .column(article::Column::PostingDate)
            .column_as(category::Column::Label, "category")
            .join(JoinType::LeftJoin, article::Relation::Province.def())
            .join(JoinType::LeftJoin, article::Relation::City.def())
            .join(JoinType::LeftJoin, article::Relation::Category.def())
            .filter(detail_cond)
            .into_model::<ArticleDetailRow>()
            .one(db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let content = article_content::Entity::find()
            .filter(article_content::Column::IdArticle.eq(article_id))
            .one(db)
            .await?
            .map(|c| c.content);

        let images = article_content_image::Entity::find()
            .filter(article_content_image::Column::IdArticle.eq(article_id))
            .all(db)
            .await?;

        let total_download: i64 = images.iter().map(|img| i64::from(img.total_download)).sum();

        article::Entity::update_many()
            .col_expr(
                article::Column::TotalView,
                Expr::col(article::Column::TotalView).add(1),
            )
            .filter(article::Column::Id.eq(article_id))
            .exec(db)
            .await?;

        Ok(Some(ArticleDetailResponse {
            id: row.id,
            title: row.title,
            thumbnail: row.thumbnail,
            is_video: row.is_video,
            video_url: row.video_url,
            total_view: row.total_view,
            total_download,
            province_name: row.province_name,
            city_name: row.city_name,
            tags: row.tags,
            posting_date: row.posting_date,
            category: row.category,
            content,
            images,
        }))
    }

    /// Records a download intent against one image. The add happens in the
    /// database, so concurrent downloads cannot clobber each other. Returns
    /// the new count, or `None` when the image does not exist.
    pub async fn increment_download(
        db: &DatabaseConnection,
        image_id: i32,
    ) -> Result<Option<i32>, DbErr> {
        let Some(image) = article_content_image::Entity::find_by_id(image_id)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        article_content_image::Entity::update_many()
            .col_expr(
                article_content_image::Column::TotalDownload,
                Expr::col(article_content_image::Column::TotalDownload).add(1),
            )
            .filter(article_content_image::Column::Id.eq(image_id))
            .exec(db)
            .await?;

        Ok(Some(image.total_download + 1))
    }

    pub async fn list_provinces(db: &DatabaseConnection) -> Result<Vec<ProvinceResponse>, DbErr> {
        let rows = province::Entity::find()
            .select_only()
            .column(province::Column::Id)
            .column(province::Column::Name)
            .column_as(article::Column::Id.count(), "article_count")
            .join_rev(
                JoinType::LeftJoin,
                article::Relation::Province
                    .def()
                    .on_condition(|_left, _right| {
                        article::Column::IsActive.eq(true).into_condition()
                    }),
            )
            .group_by(province::Column::Id)
            .group_by(province::Column::Name)
            .order_by_asc(province::Column::Name)
            .into_model::<ProvinceRow>()
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (lat, lng) = geo::coordinates_for(&row.name);
                ProvinceResponse {
                    id: row.id,
                    name: row.name,
                    article_count: row.article_count,
                    lat,
                    lng,
                }
            })
            .collect())
    }

    pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<CategoryResponse>, DbErr> {
        category::Entity::find()
            .select_only()
            .column(category::Column::Id)
            .column(category::Column::Label)
            .column(category::Column::Slug)
            .column(category::Column::Thumbnail)
            .column_as(article::Column::Id.count(), "article_count")
            .join_rev(
                JoinType::LeftJoin,
                article::Relation::Category
                    .def()
                    .on_condition(|_left, _right| {
                        article::Column::IsActive.eq(true).into_condition()
                    }),
            )
            .group_by(category::Column::Id)
            .group_by(category::Column::Label)
            .group_by(category::Column::Slug)
            .group_by(category::Column::Thumbnail)
            .order_by_asc(category::Column::Label)
            .into_model::<CategoryResponse>()
            .all(db)
            .await
    }

    pub async fn popular_tags(db: &DatabaseConnection) -> Result<Vec<PopularTagResponse>, DbErr> {
        popular_tag::Entity::find()
            .select_only()
            .column(popular_tag::Column::Tag)
            .column(popular_tag::Column::Count)
            .order_by_desc(popular_tag::Column::Count)
            .limit(POPULAR_TAG_LIMIT)
            .into_model::<PopularTagResponse>()
            .all(db)
            .await
    }

    pub async fn get_stats(db: &DatabaseConnection) -> Result<StatsResponse, DbErr> {
        let active = || article::Entity::find().filter(article::Column::IsActive.eq(true));

        let total_articles = active().count(db).await?;
        let total_photos = active()
            .filter(article::Column::IsVideo.eq(false))
            .count(db)
            .await?;
        let total_videos = active()
            .filter(article::Column::IsVideo.eq(true))
            .count(db)
            .await?;
        let total_provinces = province::Entity::find().count(db).await?;
        let total_images = article_content_image::Entity::find().count(db).await?;

        let total_views = active()
            .select_only()
            .column_as(article::Column::TotalView.sum(), "total")
            .into_tuple::<Option<i64>>()
            .one(db)
            .await?
            .flatten()
            .unwrap_or(0);

        let total_downloads = article_content_image::Entity::find()
            .select_only()
            .column_as(article_content_image::Column::TotalDownload.sum(), "total")
            .into_tuple::<Option<i64>>()
            .one(db)
            .await?
            .flatten()
            .unwrap_or(0);

        Ok(StatsResponse {
            total_articles,
            total_photos,
            total_videos,
            total_provinces,
            total_images,
            total_views,
            total_downloads,
        })
    }

    pub async fn province_name(
        db: &DatabaseConnection,
        province_id: i32,
    ) -> Result<Option<String>, DbErr> {
        Ok(province::Entity::find_by_id(province_id)
            .one(db)
            .await?
            .map(|p| p.name))
    }

    pub async fn province_names(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
        province::Entity::find()
            .select_only()
            .column(province::Column::Name)
            .into_tuple::<String>()
            .all(db)
            .await
    }

    pub async fn category_labels(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
        category::Entity::find()
            .select_only()
            .column(category::Column::Label)
            .into_tuple::<String>()
            .all(db)
            .await
    }

    /// Runs the structured stage of the AI search, then the keyword fallback.
    /// The fallback fires at most once and only when the structured filter
    /// matched nothing AND the interpretation produced keywords; an empty
    /// final result is a valid answer, not an error.
    pub async fn search_interpreted(
        db: &DatabaseConnection,
        interp: &InterpretedQuery,
    ) -> Result<Vec<SearchArticleRow>, DbErr> {
        let articles = Self::search_select(Self::interpreted_condition(interp))
            .limit(SEARCH_RESULT_LIMIT)
            .into_model::<SearchArticleRow>()
            .all(db)
            .await?;

        if articles.is_empty() {
            if let Some(keywords) = interp.keywords() {
                let fallback = ArticleFilterParams {
                    search: Some(keywords.to_string()),
                    ..Default::default()
                };
                return Self::search_select(Self::filter_condition(&fallback))
                    .limit(SEARCH_RESULT_LIMIT)
                    .into_model::<SearchArticleRow>()
                    .all(db)
                    .await;
            }
        }

        Ok(articles)
    }

    /// WHERE predicate for the structured stage of the AI search.
    fn interpreted_condition(interp: &InterpretedQuery) -> Condition {
        let mut cond = Condition::all().add(article::Column::IsActive.eq(true));

        // Substring matches on purpose: a bare "Jawa" should hit every Jawa
        // province.
        if let Some(name) = interp.province() {
            cond = cond.add(lower_like(
                (province::Entity, province::Column::Name),
                &format!("%{}%", name),
            ));
        }
        if let Some(label) = interp.category() {
            cond = cond.add(lower_like(
                (category::Entity, category::Column::Label),
                &format!("%{}%", label),
            ));
        }
        if let Some(v) = interp.is_video {
            cond = cond.add(article::Column::IsVideo.eq(v));
        }

        cond
    }

    pub async fn top_articles_for_province(
        db: &DatabaseConnection,
        province_id: i32,
    ) -> Result<Vec<SearchArticleRow>, DbErr> {
        let cond = Condition::all()
            .add(article::Column::IsActive.eq(true))
            .add(article::Column::IdProvince.eq(province_id));

        Self::search_select(cond)
            .limit(RECOMMEND_ARTICLE_LIMIT)
            .into_model::<SearchArticleRow>()
            .all(db)
            .await
    }
}

/// Pagination evaluator: whether rows remain past the page just returned.
/// An offset beyond the end yields zero rows and therefore `false`.
pub fn has_more_pages(offset: u64, returned: usize, total: u64) -> bool {
    offset + (returned as u64) < total
}

/// `LOWER(col) LIKE LOWER(pattern)`. Both sides fold in the database, so one
/// set of collation rules governs the comparison.
fn lower_like<C: IntoColumnRef>(col: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).binary(BinOper::Like, Func::lower(Expr::val(pattern)))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, MockExecResult, QueryTrait, Value};

    use super::*;

    fn render(select: Select<article::Entity>) -> String {
        select.build(DbBackend::Postgres).to_string()
    }

    fn where_clause(sql: &str) -> &str {
        let start = sql.rfind("WHERE").expect("query has a WHERE clause");
        let rest = &sql[start..];
        let end = rest
            .find(" ORDER BY")
            .or_else(|| rest.find(" LIMIT"))
            .unwrap_or(rest.len());
        &rest[..end]
    }

    fn all_filters() -> ArticleFilterParams {
        ArticleFilterParams {
            province_id: Some(7),
            category_id: Some(3),
            is_video: Some(false),
            search: Some("Borobudur".to_string()),
            sort_by: ArticleSort::Popular,
            limit: Some(10),
            offset: 0,
        }
    }

    fn search_row(id: i32, title: &str, total_view: i32) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", Value::from(id)),
            ("title", Value::from(title)),
            ("thumbnail", Value::from("thumb.jpg")),
            ("is_video", Value::from(false)),
            ("total_view", Value::from(total_view)),
            ("province_name", Value::String(None)),
            ("city_name", Value::String(None)),
            ("tags", Value::String(None)),
            ("posting_date", Value::ChronoDate(None)),
            ("category", Value::String(None)),
        ])
    }

    fn article_row(id: i32, title: &str, total_view: i32) -> BTreeMap<&'static str, Value> {
        let mut row = search_row(id, title, total_view);
        row.insert("total_download", Value::from(0i64));
        row
    }

    fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::from(total))])
    }

    #[test]
    fn listing_and_count_share_the_where_clause() {
        // Divergence between the two call sites is the defect class the
        // shared builder exists to prevent.
        let params = all_filters();
        let listing = render(CatalogService::listing_select(
            CatalogService::filter_condition(&params),
            params.sort_by,
        ));
        let count = render(CatalogService::count_select(
            CatalogService::filter_condition(&params),
        ));

        assert_eq!(where_clause(&listing), where_clause(&count));
    }

    #[test]
    fn base_predicate_always_requires_active_rows() {
        let sql = render(CatalogService::listing_select(
            CatalogService::filter_condition(&ArticleFilterParams::default()),
            ArticleSort::Recent,
        ));
        assert!(sql.contains(r#""Article"."is_active" = TRUE"#));
    }

    #[test]
    fn absent_filters_contribute_nothing() {
        let sql = render(CatalogService::listing_select(
            CatalogService::filter_condition(&ArticleFilterParams::default()),
            ArticleSort::Recent,
        ));
        assert!(!sql.contains("id_province ="));
        assert!(!sql.contains("id_category ="));
        assert!(!sql.contains("LIKE"));
    }

    #[test]
    fn search_filter_is_one_or_group_over_title_and_tags() {
        // Both sides of the LIKE fold in the database; the bound pattern
        // keeps the caller's casing.
        let params = ArticleFilterParams {
            search: Some("PanTai".to_string()),
            ..Default::default()
        };
        let sql = render(CatalogService::listing_select(
            CatalogService::filter_condition(&params),
            ArticleSort::Recent,
        ));
        assert!(sql.contains(r#"(LOWER("Article"."title") LIKE LOWER('%PanTai%') OR LOWER("Article"."tags_csv") LIKE LOWER('%PanTai%'))"#));
    }

    #[test]
    fn sort_keys_map_to_their_order_columns() {
        let cond = || CatalogService::filter_condition(&ArticleFilterParams::default());

        let recent = render(CatalogService::listing_select(cond(), ArticleSort::Recent));
        assert!(recent.contains(r#"ORDER BY "Article"."posting_date" DESC"#));

        let popular = render(CatalogService::listing_select(cond(), ArticleSort::Popular));
        assert!(popular.contains(r#"ORDER BY "Article"."total_view" DESC"#));

        let downloads = render(CatalogService::listing_select(
            cond(),
            ArticleSort::Downloads,
        ));
        assert!(downloads.contains(r#"ORDER BY "total_download" DESC"#));
    }

    #[test]
    fn download_total_is_a_correlated_aggregate() {
        let sql = render(CatalogService::listing_select(
            CatalogService::filter_condition(&ArticleFilterParams::default()),
            ArticleSort::Recent,
        ));
        assert!(sql.contains(r#"SELECT SUM(i.total_download) FROM "ArticleContentImage""#));
    }

    #[test]
    fn search_select_breaks_view_ties_by_id() {
        let sql = render(CatalogService::search_select(
            Condition::all().add(article::Column::IsActive.eq(true)),
        ));
        assert!(sql.contains(r#"ORDER BY "Article"."total_view" DESC, "Article"."id" ASC"#));
    }

    #[test]
    fn has_more_pages_contract() {
        assert!(has_more_pages(0, 2, 5));
        assert!(has_more_pages(2, 2, 5));
        assert!(!has_more_pages(4, 1, 5));
        assert!(!has_more_pages(0, 0, 0));
        // Offset past the end: zero rows returned, nothing more to fetch.
        assert!(!has_more_pages(10, 0, 5));
        // Exact boundary.
        assert!(!has_more_pages(3, 2, 5));
    }

    #[tokio::test]
    async fn paginated_listing_reports_total_and_has_more() {
        // Five matching articles, page of two, highest views first.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(5)]])
            .append_query_results([vec![
                article_row(4, "Candi", 80),
                article_row(2, "Kawah", 50),
            ]])
            .into_connection();

        let params = ArticleFilterParams {
            category_id: Some(3),
            sort_by: ArticleSort::Popular,
            limit: Some(2),
            ..Default::default()
        };
        let page = CatalogService::list_articles_paginated(&db, &params)
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        assert!(page.has_more);
        let views: Vec<i32> = page.articles.iter().map(|a| a.total_view).collect();
        assert_eq!(views, vec![80, 50]);
    }

    #[tokio::test]
    async fn detail_read_increments_view_count_each_time() {
        let detail_row = || {
            BTreeMap::from([
                ("id", Value::from(1)),
                ("title", Value::from("Bromo")),
                ("thumbnail", Value::from("thumb.jpg")),
                ("is_video", Value::from(false)),
                ("video_url", Value::String(None)),
                ("total_view", Value::from(41)),
                ("province_name", Value::from("JAWA TIMUR")),
                ("city_name", Value::String(None)),
                ("tags", Value::from("gunung,sunrise")),
                (
                    "posting_date",
                    Value::from(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
                ),
                ("category", Value::from("Alam")),
            ])
        };
        let content_row = || {
            BTreeMap::from([
                ("id", Value::from(1)),
                ("id_article", Value::from(1)),
                ("content", Value::from("Long form body")),
            ])
        };
        let image_row = |id: i32, downloads: i32| {
            BTreeMap::from([
                ("id", Value::from(id)),
                ("id_article", Value::from(1)),
                ("thumbnail", Value::from("t.jpg")),
                ("image_url", Value::from("full.jpg")),
                ("total_download", Value::from(downloads)),
            ])
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![detail_row()]])
            .append_query_results([vec![content_row()]])
            .append_query_results([vec![image_row(10, 3), image_row(11, 4)]])
            .append_query_results([vec![detail_row()]])
            .append_query_results([vec![content_row()]])
            .append_query_results([vec![image_row(10, 3), image_row(11, 4)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let first = CatalogService::get_article_detail(&db, 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.total_download, 7);
        assert_eq!(first.content.as_deref(), Some("Long form body"));
        assert_eq!(first.images.len(), 2);

        // Reads are not idempotent: a second read issues a second increment.
        CatalogService::get_article_detail(&db, 1)
            .await
            .unwrap()
            .unwrap();

        let log = format!("{:?}", db.into_transaction_log());
        assert_eq!(log.matches("UPDATE \\\"Article\\\"").count(), 2);
    }

    #[tokio::test]
    async fn detail_read_of_missing_article_is_none_and_writes_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let detail = CatalogService::get_article_detail(&db, 99).await.unwrap();
        assert!(detail.is_none());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("UPDATE"));
    }

    #[tokio::test]
    async fn download_increment_adds_one_in_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([
                ("id", Value::from(10)),
                ("id_article", Value::from(1)),
                ("thumbnail", Value::from("t.jpg")),
                ("image_url", Value::from("full.jpg")),
                ("total_download", Value::from(5)),
            ])]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let new_count = CatalogService::increment_download(&db, 10).await.unwrap();
        assert_eq!(new_count, Some(6));

        // The write is a relative SET, not a write-back of a read value.
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("\\\"total_download\\\" = \\\"total_download\\\" +"));
    }

    #[tokio::test]
    async fn download_increment_on_missing_image_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let new_count = CatalogService::increment_download(&db, 404).await.unwrap();
        assert_eq!(new_count, None);
    }

    #[tokio::test]
    async fn empty_structured_match_with_keywords_falls_back_once() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .append_query_results([vec![search_row(1, "Pantai Kuta", 120)]])
            .into_connection();

        let interp = InterpretedQuery {
            province: Some("SUMATERA".to_string()),
            keywords: Some("pantai".to_string()),
            ..Default::default()
        };
        let articles = CatalogService::search_interpreted(&db, &interp)
            .await
            .unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Pantai Kuta");

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn empty_structured_match_without_keywords_stays_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let interp = InterpretedQuery {
            province: Some("SUMATERA".to_string()),
            keywords: Some(String::new()),
            ..Default::default()
        };
        let articles = CatalogService::search_interpreted(&db, &interp)
            .await
            .unwrap();
        assert!(articles.is_empty());

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn structured_match_skips_fallback_when_rows_exist() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                search_row(1, "Candi Borobudur", 90),
                search_row(2, "Candi Prambanan", 70),
            ]])
            .into_connection();

        let interp = InterpretedQuery {
            province: Some("Jawa".to_string()),
            keywords: Some("candi".to_string()),
            ..Default::default()
        };
        let articles = CatalogService::search_interpreted(&db, &interp)
            .await
            .unwrap();
        assert_eq!(articles.len(), 2);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn interpreted_province_matches_by_substring() {
        let interp = InterpretedQuery {
            province: Some("Jawa".to_string()),
            ..Default::default()
        };
        let sql = render(CatalogService::search_select(
            CatalogService::interpreted_condition(&interp),
        ));
        assert!(sql.contains(r#"LOWER("Province"."name") LIKE LOWER('%Jawa%')"#));
    }

    #[test]
    fn province_listing_counts_only_active_articles() {
        let select = province::Entity::find()
            .select_only()
            .column(province::Column::Id)
            .column(province::Column::Name)
            .column_as(article::Column::Id.count(), "article_count")
            .join_rev(
                JoinType::LeftJoin,
                article::Relation::Province
                    .def()
                    .on_condition(|_left, _right| {
                        article::Column::IsActive.eq(true).into_condition()
                    }),
            )
            .group_by(province::Column::Id);
        let sql = select.build(DbBackend::Postgres).to_string();
        assert!(sql.contains("LEFT JOIN"));
        assert!(sql.contains(r#""Article"."is_active" = TRUE"#));
    }
}
