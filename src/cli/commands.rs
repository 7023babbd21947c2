use crate::analytics::{
    cumulative, monthly, rank, stock_heavy, tag_monthly, tag_summary, DateRange, Filter, RankBy,
    TagMonth, TagStats, Totals,
};
use crate::app::{AppContext, Result};
use crate::cli::FilterArgs;
use crate::domain::{Credential, Item, StockStatus};
use crate::pipeline::EnrichReport;

/// Items left after filtering, plus what they were filtered by.
pub struct Selection {
    pub items: Vec<Item>,
    pub range: Option<DateRange>,
    pub collected: usize,
    pub report: EnrichReport,
}

impl Selection {
    /// Human label for the period, e.g. `2024-01-01 ~ 2024-01-31`.
    pub fn period(&self) -> String {
        match self.range.or_else(|| DateRange::spanning(&self.items)) {
            Some(range) => format!("{} ~ {}", range.start(), range.end()),
            None => "(no articles)".to_string(),
        }
    }
}

/// Run the pipeline and narrow its output by the CLI filter flags.
pub async fn select(
    ctx: &AppContext,
    credential: &Credential,
    args: &FilterArgs,
) -> Result<Selection> {
    let enrich = !args.no_stocks;
    let run = if args.refresh {
        ctx.pipeline.refresh(credential, enrich).await?
    } else {
        ctx.pipeline.run(credential, enrich).await?
    };

    let range = DateRange::resolve(args.from, args.to, &run.items)?;
    let include_private = args.include_private || ctx.config.display.include_private;
    let items = Filter::new(range, include_private).apply(&run.items);

    Ok(Selection {
        items,
        range,
        collected: run.items.len(),
        report: run.report,
    })
}

fn stock_cell(item: &Item) -> String {
    match item.stock_status {
        StockStatus::Measured => item.stock_count.to_string(),
        StockStatus::Degraded => format!("{}*", item.stock_count),
        StockStatus::Unrequested => "-".to_string(),
    }
}

/// Month-by-month cells for the `top_n` leading tags of `stats`.
fn top_tag_months(stats: &[TagStats], items: &[Item], top_n: usize) -> Vec<TagMonth> {
    let names: Vec<String> = stats.iter().take(top_n).map(|s| s.tag.clone()).collect();
    tag_monthly(items, &names)
}

fn print_header(selection: &Selection) {
    println!("Period: {}", selection.period());
    if selection.report.degraded > 0 {
        println!(
            "  * stock lookup failed for {} articles; shown as 0",
            selection.report.degraded
        );
    }
}

/// Returns false (after telling the user) when there is nothing to show.
fn has_items(selection: &Selection) -> bool {
    if selection.collected == 0 {
        println!("No articles found");
        return false;
    }
    if selection.items.is_empty() {
        println!("No articles in {} for the chosen visibility", selection.period());
        return false;
    }
    true
}

pub async fn list_items(
    ctx: &AppContext,
    credential: &Credential,
    args: &FilterArgs,
    newest_first: bool,
) -> Result<()> {
    let mut selection = select(ctx, credential, args).await?;
    if !has_items(&selection) {
        return Ok(());
    }

    selection.items.sort_by_key(|item| item.created_at);
    if newest_first {
        selection.items.reverse();
    }

    print_header(&selection);
    for item in &selection.items {
        println!(
            "{} {:>5} likes {:>5} stocks {:>7} views  {}",
            item.date(),
            item.like_count,
            stock_cell(item),
            item.view_count,
            item.display_title()
        );
        println!("           {}", item.url);
    }

    Ok(())
}

pub async fn summary(ctx: &AppContext, credential: &Credential, args: &FilterArgs) -> Result<()> {
    let selection = select(ctx, credential, args).await?;
    if !has_items(&selection) {
        return Ok(());
    }

    let totals = Totals::of(&selection.items);
    let averages = totals.averages();

    print_header(&selection);
    println!("Totals");
    println!("  articles {:>8}", totals.articles);
    println!("  likes    {:>8}", totals.likes);
    println!("  stocks   {:>8}", totals.stocks);
    println!("  views    {:>8}", totals.views);
    println!("Per article");
    println!("  likes    {:>8.2}", averages.likes);
    println!("  stocks   {:>8.2}", averages.stocks);
    println!("  views    {:>8.2}", averages.views);

    Ok(())
}

pub async fn ranking(
    ctx: &AppContext,
    credential: &Credential,
    args: &FilterArgs,
    by: RankBy,
    top: Option<usize>,
) -> Result<()> {
    let selection = select(ctx, credential, args).await?;
    if !has_items(&selection) {
        return Ok(());
    }

    let top_n = top.unwrap_or(ctx.config.display.top_n);
    print_header(&selection);
    println!("Top {} by {:?}", top_n, by);
    for ranked in rank(&selection.items, by, top_n) {
        let item = ranked.item;
        println!(
            "{:>3}. {:>5} likes {:>5} stocks {:>7} views  {}",
            ranked.rank,
            item.like_count,
            stock_cell(item),
            item.view_count,
            item.display_title()
        );
    }

    Ok(())
}

pub async fn tags(
    ctx: &AppContext,
    credential: &Credential,
    args: &FilterArgs,
    top: Option<usize>,
    by_month: bool,
) -> Result<()> {
    let selection = select(ctx, credential, args).await?;
    if !has_items(&selection) {
        return Ok(());
    }

    let top_n = top.unwrap_or(ctx.config.display.top_n);
    let stats = tag_summary(&selection.items);
    if stats.is_empty() {
        println!("No tagged articles");
        return Ok(());
    }

    print_header(&selection);
    if by_month {
        println!(
            "{:<7} {:<24} {:>8} {:>8} {:>9}",
            "month", "tag", "likes", "stocks", "views"
        );
        for cell in top_tag_months(&stats, &selection.items, top_n) {
            println!(
                "{:<7} {:<24} {:>8} {:>8} {:>9}",
                cell.month, cell.tag, cell.likes_sum, cell.stocks_sum, cell.views_sum
            );
        }
        return Ok(());
    }

    println!(
        "{:<24} {:>8} {:>8} {:>8} {:>9} {:>8} {:>8} {:>9}",
        "tag", "articles", "likes", "stocks", "views", "avg like", "avg stk", "avg view"
    );
    for tag in stats.iter().take(top_n) {
        println!(
            "{:<24} {:>8} {:>8} {:>8} {:>9} {:>8.2} {:>8.2} {:>9.2}",
            tag.tag,
            tag.articles,
            tag.likes_sum,
            tag.stocks_sum,
            tag.views_sum,
            tag.likes_avg(),
            tag.stocks_avg(),
            tag.views_avg()
        );
    }

    Ok(())
}

pub async fn timeline(
    ctx: &AppContext,
    credential: &Credential,
    args: &FilterArgs,
    running: bool,
) -> Result<()> {
    let selection = select(ctx, credential, args).await?;
    if !has_items(&selection) {
        return Ok(());
    }

    print_header(&selection);
    if running {
        for point in cumulative(&selection.items) {
            println!(
                "{} {:>7} likes {:>7} stocks  {}",
                point.at.format("%Y-%m-%d %H:%M"),
                point.likes,
                point.stocks,
                point.id
            );
        }
    } else {
        for bucket in monthly(&selection.items) {
            println!(
                "{} {:>4} articles {:>7} likes {:>7} stocks",
                bucket.key(),
                bucket.articles,
                bucket.likes,
                bucket.stocks
            );
        }
    }

    Ok(())
}

pub async fn stock_heavy_items(
    ctx: &AppContext,
    credential: &Credential,
    args: &FilterArgs,
    top: Option<usize>,
) -> Result<()> {
    if args.no_stocks {
        println!("Stock counts are needed for this view; drop --no-stocks");
        return Ok(());
    }

    let selection = select(ctx, credential, args).await?;
    if !has_items(&selection) {
        return Ok(());
    }

    let top_n = top.unwrap_or(ctx.config.display.top_n);
    let heavy = stock_heavy(&selection.items, top_n);

    print_header(&selection);
    if heavy.is_empty() {
        println!("No article has more stocks than likes");
        return Ok(());
    }
    for item in heavy {
        println!(
            "{:>5} stocks {:>5} likes {:>7} views  {}",
            item.stock_count,
            item.like_count,
            item.view_count,
            item.display_title()
        );
    }

    Ok(())
}
