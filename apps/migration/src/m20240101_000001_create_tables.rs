use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(pk(UserProfile::Id))
                    .col(
                        ColumnDef::new(UserProfile::FirebaseUserId)
                            .string_len(28)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserProfile::DisplayName).string_len(50).not_null())
                    .col(ColumnDef::new(UserProfile::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(UserProfile::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(UserProfile::Email).string_len(255).not_null())
                    .col(ColumnDef::new(UserProfile::ImageLocation).string_len(255).null())
                    .col(created_at(UserProfile::CreateDateTime))
                    .col(
                        ColumnDef::new(UserProfile::UserTypeId)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(pk(Category::Id))
                    .col(ColumnDef::new(Category::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(pk(Post::Id))
                    .col(ColumnDef::new(Post::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Post::Content).text().not_null())
                    .col(ColumnDef::new(Post::ImageLocation).string_len(255).null())
                    .col(created_at(Post::CreateDateTime))
                    .col(
                        ColumnDef::new(Post::PublishDateTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Post::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Post::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Post::UserProfileId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_category")
                            .from(Post::Table, Post::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_user_profile")
                            .from(Post::Table, Post::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_post_publish_date_time")
                    .table(Post::Table)
                    .col(Post::PublishDateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(pk(Comment::Id))
                    .col(ColumnDef::new(Comment::PostId).integer().not_null())
                    .col(ColumnDef::new(Comment::UserProfileId).integer().not_null())
                    .col(ColumnDef::new(Comment::Subject).string_len(255).not_null())
                    .col(ColumnDef::new(Comment::Content).text().not_null())
                    .col(created_at(Comment::CreateDateTime))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_post")
                            .from(Comment::Table, Comment::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_user_profile")
                            .from(Comment::Table, Comment::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(pk(Tag::Id))
                    .col(ColumnDef::new(Tag::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Tag::Active).boolean().not_null().default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostTag::Table)
                    .if_not_exists()
                    .col(pk(PostTag::Id))
                    .col(ColumnDef::new(PostTag::PostId).integer().not_null())
                    .col(ColumnDef::new(PostTag::TagId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tag_post")
                            .from(PostTag::Table, PostTag::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tag_tag")
                            .from(PostTag::Table, PostTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("uq_post_tag_pair")
                            .col(PostTag::PostId)
                            .col(PostTag::TagId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(pk(Subscription::Id))
                    .col(
                        ColumnDef::new(Subscription::SubscriberUserProfileId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscription::ProviderUserProfileId)
                            .integer()
                            .not_null(),
                    )
                    .col(created_at(Subscription::BeginDateTime))
                    .col(
                        ColumnDef::new(Subscription::EndDateTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_subscriber")
                            .from(Subscription::Table, Subscription::SubscriberUserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_provider")
                            .from(Subscription::Table, Subscription::ProviderUserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("uq_subscription_pair")
                            .col(Subscription::SubscriberUserProfileId)
                            .col(Subscription::ProviderUserProfileId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reaction::Table)
                    .if_not_exists()
                    .col(pk(Reaction::Id))
                    .col(ColumnDef::new(Reaction::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Reaction::ImageLocation)
                            .string_len(255)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostReaction::Table)
                    .if_not_exists()
                    .col(pk(PostReaction::Id))
                    .col(ColumnDef::new(PostReaction::PostId).integer().not_null())
                    .col(ColumnDef::new(PostReaction::ReactionId).integer().not_null())
                    .col(ColumnDef::new(PostReaction::UserProfileId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_reaction_post")
                            .from(PostReaction::Table, PostReaction::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_reaction_reaction")
                            .from(PostReaction::Table, PostReaction::ReactionId)
                            .to(Reaction::Table, Reaction::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_reaction_user_profile")
                            .from(PostReaction::Table, PostReaction::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("uq_post_reaction_once")
                            .col(PostReaction::PostId)
                            .col(PostReaction::ReactionId)
                            .col(PostReaction::UserProfileId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Names are unique regardless of case.
        let db = manager.get_connection();
        for (index, table) in [
            ("uq_category_name_lower", "category"),
            ("uq_tag_name_lower", "tag"),
        ] {
            db.execute_unprepared(&format!(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS "{index}" ON "{table}" (lower("name"))"#
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            PostReaction::Table.into_iden(),
            Reaction::Table.into_iden(),
            Subscription::Table.into_iden(),
            PostTag::Table.into_iden(),
            Tag::Table.into_iden(),
            Comment::Table.into_iden(),
            Post::Table.into_iden(),
            Category::Table.into_iden(),
            UserProfile::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}

fn pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn created_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum UserProfile {
    Table,
    Id,
    FirebaseUserId,
    DisplayName,
    FirstName,
    LastName,
    Email,
    ImageLocation,
    CreateDateTime,
    UserTypeId,
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Post {
    Table,
    Id,
    Title,
    Content,
    ImageLocation,
    CreateDateTime,
    PublishDateTime,
    IsApproved,
    CategoryId,
    UserProfileId,
}

#[derive(DeriveIden)]
enum Comment {
    Table,
    Id,
    PostId,
    UserProfileId,
    Subject,
    Content,
    CreateDateTime,
}

#[derive(DeriveIden)]
enum Tag {
    Table,
    Id,
    Name,
    Active,
}

#[derive(DeriveIden)]
enum PostTag {
    Table,
    Id,
    PostId,
    TagId,
}

#[derive(DeriveIden)]
enum Subscription {
    Table,
    Id,
    SubscriberUserProfileId,
    ProviderUserProfileId,
    BeginDateTime,
    EndDateTime,
}

#[derive(DeriveIden)]
enum Reaction {
    Table,
    Id,
    Name,
    ImageLocation,
}

#[derive(DeriveIden)]
enum PostReaction {
    Table,
    Id,
    PostId,
    ReactionId,
    UserProfileId,
}
