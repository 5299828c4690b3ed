use futures::StreamExt;
use futures::stream;
use std::future::Future;

/// 以给定并发上限执行一组future，结果顺序与输入顺序一致
///
/// 每个future的结果独立返回，单个失败不会取消其余任务。
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, max_concurrent: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    stream::iter(futures)
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}
