use crate::{
    Res,
    spotify::SpotifyClient,
    taste::query::RecommendationQuery,
    types::{RecommendationsResponse, Track},
};

impl SpotifyClient {
    pub async fn recommendations(&self, query: &RecommendationQuery) -> Res<Vec<Track>> {
        let res: RecommendationsResponse = self
            .send(self.get("recommendations").query(&query.to_query_pairs()))
            .await?;
        Ok(res.tracks)
    }
}
