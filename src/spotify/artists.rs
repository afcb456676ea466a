use crate::{
    Res,
    spotify::SpotifyClient,
    types::{Artist, SeveralArtistsResponse},
};

impl SpotifyClient {
    /// Looks up several artists in one request. Unknown ids are dropped.
    pub async fn get_several_artists(&self, ids: &[String]) -> Res<Vec<Artist>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let res: SeveralArtistsResponse = self
            .send(self.get("artists").query(&[("ids", ids.join(","))]))
            .await?;

        Ok(res.artists.into_iter().flatten().collect())
    }
}
