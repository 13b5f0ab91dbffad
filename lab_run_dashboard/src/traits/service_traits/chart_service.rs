use crate::common::*;

use crate::model::chart::chart_spec::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = "
        Render a chart description and save it as an image file
        # Arguments
        * `title` - Chart title
        * `chart` - What to draw
        * `output_path` - Path where the chart image will be saved
    "]
    async fn render_chart(
        &self,
        title: &str,
        chart: &ChartSpec,
        output_path: &Path,
    ) -> anyhow::Result<()>;
}
