use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Reference tables
        manager
            .create_table(
                Table::create()
                    .table(Province::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Province::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Province::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(City::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(City::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(City::Name).string().not_null())
                    .col(ColumnDef::new(City::IdProvince).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_city_id_province")
                            .from(City::Table, City::IdProvince)
                            .to(Province::Table, Province::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Category::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Category::Label).string().not_null())
                    .col(ColumnDef::new(Category::Slug).string().not_null())
                    .col(ColumnDef::new(Category::Thumbnail).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 2. Content tables
        manager
            .create_table(
                Table::create()
                    .table(Article::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Article::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Article::Title).string().not_null())
                    .col(ColumnDef::new(Article::Thumbnail).string().not_null())
                    .col(ColumnDef::new(Article::IsVideo).boolean().not_null().default(false))
                    .col(ColumnDef::new(Article::VideoUrl).string().null())
                    .col(ColumnDef::new(Article::TotalView).integer().not_null().default(0))
                    .col(ColumnDef::new(Article::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Article::PostingDate).date().null())
                    .col(ColumnDef::new(Article::TagsCsv).text().null())
                    .col(ColumnDef::new(Article::IdProvince).integer().null())
                    .col(ColumnDef::new(Article::IdCity).integer().null())
                    .col(ColumnDef::new(Article::IdCategory).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_id_province")
                            .from(Article::Table, Article::IdProvince)
                            .to(Province::Table, Province::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_id_city")
                            .from(Article::Table, Article::IdCity)
                            .to(City::Table, City::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_id_category")
                            .from(Article::Table, Article::IdCategory)
                            .to(Category::Table, Category::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ArticleContent::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ArticleContent::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(ArticleContent::IdArticle).integer().not_null())
                    .col(ColumnDef::new(ArticleContent::Content).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_content_id_article")
                            .from(ArticleContent::Table, ArticleContent::IdArticle)
                            .to(Article::Table, Article::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ArticleContentImage::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ArticleContentImage::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(ArticleContentImage::IdArticle).integer().not_null())
                    .col(ColumnDef::new(ArticleContentImage::Thumbnail).string().not_null())
                    .col(ColumnDef::new(ArticleContentImage::ImageUrl).string().not_null())
                    .col(ColumnDef::new(ArticleContentImage::TotalDownload).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_content_image_id_article")
                            .from(ArticleContentImage::Table, ArticleContentImage::IdArticle)
                            .to(Article::Table, Article::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PopularTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PopularTag::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(PopularTag::Tag).string().not_null())
                    .col(ColumnDef::new(PopularTag::Count).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        // Indexes for the listing filters and sorts
        manager
            .create_index(
                Index::create()
                    .name("idx_article_is_active")
                    .table(Article::Table)
                    .col(Article::IsActive)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_article_posting_date")
                    .table(Article::Table)
                    .col(Article::PostingDate)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_article_total_view")
                    .table(Article::Table)
                    .col(Article::TotalView)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_article_content_image_id_article")
                    .table(ArticleContentImage::Table)
                    .col(ArticleContentImage::IdArticle)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PopularTag::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ArticleContentImage::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ArticleContent::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Article::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(City::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Province::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Province {
    #[iden = "Province"]
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum City {
    #[iden = "City"]
    Table,
    Id,
    Name,
    IdProvince,
}

#[derive(Iden)]
enum Category {
    #[iden = "Category"]
    Table,
    Id,
    Label,
    Slug,
    Thumbnail,
}

#[derive(Iden)]
enum Article {
    #[iden = "Article"]
    Table,
    Id,
    Title,
    Thumbnail,
    IsVideo,
    VideoUrl,
    TotalView,
    IsActive,
    PostingDate,
    TagsCsv,
    IdProvince,
    IdCity,
    IdCategory,
}

#[derive(Iden)]
enum ArticleContent {
    #[iden = "ArticleContent"]
    Table,
    Id,
    IdArticle,
    Content,
}

#[derive(Iden)]
enum ArticleContentImage {
    #[iden = "ArticleContentImage"]
    Table,
    Id,
    IdArticle,
    Thumbnail,
    ImageUrl,
    TotalDownload,
}

#[derive(Iden)]
enum PopularTag {
    #[iden = "PopularTag"]
    Table,
    Id,
    Tag,
    Count,
}
