use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::pk_auto;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Attribute {
    Table,
    Id,
    Name,
    DataType,
    IsFilterable,
    Unit,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttributeOption {
    Table,
    Id,
    AttributeId,
    OptionValue,
    SortOrder,
}

#[derive(DeriveIden)]
enum PropertyType {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TypeAttributeLink {
    Table,
    TypeId,
    AttributeId,
    SortOrder,
}

#[derive(DeriveIden)]
enum Property {
    Table,
    Id,
    TypeId,
    Attributes,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_tables(manager).await?;
        create_indexes(manager).await?;
        create_sqlite_updated_at_triggers(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Property::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TypeAttributeLink::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttributeOption::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropertyType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attribute::Table).to_owned())
            .await?;
        Ok(())
    }
}

async fn create_tables(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Attribute::Table)
                .if_not_exists()
                .col(pk_auto(Attribute::Id))
                .col(ColumnDef::new(Attribute::Name).string_len(128).not_null())
                .col(
                    ColumnDef::new(Attribute::DataType)
                        .string_len(16)
                        .not_null(),
                )
                .col(
                    ColumnDef::new(Attribute::IsFilterable)
                        .boolean()
                        .not_null()
                        .default(true),
                )
                .col(ColumnDef::new(Attribute::Unit).string_len(32))
                .col(
                    ColumnDef::new(Attribute::CreatedAt)
                        .timestamp()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(Attribute::UpdatedAt)
                        .timestamp()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(AttributeOption::Table)
                .if_not_exists()
                .col(pk_auto(AttributeOption::Id))
                .col(
                    ColumnDef::new(AttributeOption::AttributeId)
                        .integer()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AttributeOption::OptionValue)
                        .string_len(128)
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AttributeOption::SortOrder)
                        .integer()
                        .not_null()
                        .default(0),
                )
                .foreign_key(
                    ForeignKey::create()
                        .from(AttributeOption::Table, AttributeOption::AttributeId)
                        .to(Attribute::Table, Attribute::Id),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(PropertyType::Table)
                .if_not_exists()
                .col(pk_auto(PropertyType::Id))
                .col(
                    ColumnDef::new(PropertyType::Name)
                        .string_len(128)
                        .not_null(),
                )
                .col(ColumnDef::new(PropertyType::Description).text())
                .col(
                    ColumnDef::new(PropertyType::CreatedAt)
                        .timestamp()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(PropertyType::UpdatedAt)
                        .timestamp()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(TypeAttributeLink::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(TypeAttributeLink::TypeId)
                        .integer()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(TypeAttributeLink::AttributeId)
                        .integer()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(TypeAttributeLink::SortOrder)
                        .integer()
                        .not_null(),
                )
                .primary_key(
                    Index::create()
                        .col(TypeAttributeLink::TypeId)
                        .col(TypeAttributeLink::AttributeId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .from(TypeAttributeLink::Table, TypeAttributeLink::TypeId)
                        .to(PropertyType::Table, PropertyType::Id),
                )
                .foreign_key(
                    ForeignKey::create()
                        .from(TypeAttributeLink::Table, TypeAttributeLink::AttributeId)
                        .to(Attribute::Table, Attribute::Id),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Property::Table)
                .if_not_exists()
                .col(pk_auto(Property::Id))
                .col(ColumnDef::new(Property::TypeId).integer().not_null())
                .col(ColumnDef::new(Property::Attributes).json().not_null())
                .col(
                    ColumnDef::new(Property::CreatedAt)
                        .timestamp()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(Property::UpdatedAt)
                        .timestamp()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .from(Property::Table, Property::TypeId)
                        .to(PropertyType::Table, PropertyType::Id),
                )
                .to_owned(),
        )
        .await?;

    Ok(())
}

async fn create_indexes(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    // Backs the "no two links under one type share a sort_order" invariant;
    // scope saves always rewrite positions 0..n so this never fires on the
    // happy path.
    manager
        .create_index(
            Index::create()
                .name("uq_type_attribute_link_order")
                .table(TypeAttributeLink::Table)
                .col(TypeAttributeLink::TypeId)
                .col(TypeAttributeLink::SortOrder)
                .unique()
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("uq_attribute_option_value")
                .table(AttributeOption::Table)
                .col(AttributeOption::AttributeId)
                .col(AttributeOption::OptionValue)
                .unique()
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_property_type_id")
                .table(Property::Table)
                .col(Property::TypeId)
                .to_owned(),
        )
        .await?;

    Ok(())
}

/// Create SQLite triggers to automatically update the `updated_at` column on row updates.
///
/// For SQLite, column defaults do not support `ON UPDATE CURRENT_TIMESTAMP`. We therefore
/// create an `AFTER UPDATE` trigger per table that contains an `UpdatedAt` column. The
/// trigger updates the `updated_at` field only when the application has not explicitly
/// changed it, and it uses a `WHEN` clause to prevent infinite recursion.
async fn create_sqlite_updated_at_triggers(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    if manager.get_database_backend() != DatabaseBackend::Sqlite {
        return Ok(());
    }

    let conn = manager.get_connection();
    for table_name in ["attribute", "property_type", "property"] {
        let trigger_name = format!("trg_{}_updated_at", table_name);
        let sql = format!(
            r#"
            CREATE TRIGGER IF NOT EXISTS "{trigger_name}"
            AFTER UPDATE ON "{table_name}"
            FOR EACH ROW
            WHEN NEW."updated_at" = OLD."updated_at"
            BEGIN
                UPDATE "{table_name}" SET "updated_at" = CURRENT_TIMESTAMP WHERE rowid = NEW.rowid;
            END;
            "#
        );

        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql))
            .await?;
    }

    Ok(())
}
